use embedding::EmbeddingError;
use profile::ProfileError;
use thiserror::Error;

/// Errors produced by the corpus index.
#[derive(Debug, Error, Clone)]
pub enum IndexError {
    /// A corpus build was attempted with zero profiles. Build-time fatal:
    /// no index object exists without at least one profile.
    #[error("cannot build an index from an empty corpus")]
    CorpusEmpty,
    /// A vector's dimension disagrees with the index's configured dimension.
    /// This is a configuration error between the encoder and the stored
    /// index; the result set would be meaningless, so it is fatal.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    /// The profile set failed structural validation.
    #[error(transparent)]
    Profile(#[from] ProfileError),
    /// The embedding provider failed while encoding the corpus.
    #[error("embedding failure during corpus build: {0}")]
    Embedding(#[from] EmbeddingError),
}
