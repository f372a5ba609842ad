use embedding::EmbeddingError;
use index::IndexError;
use thiserror::Error;

/// Errors produced by the match engine.
///
/// Everything here makes the result set untrustworthy and surfaces to the
/// caller. Explanation failures never appear: they degrade to an
/// explanation-less recommendation inside the assembler. "No matches" is
/// likewise absent: it is a valid outcome
/// ([`RecommendOutcome::NoMatches`](crate::RecommendOutcome::NoMatches)),
/// not a failure.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// Query text was empty after normalization. Rejected before any
    /// embedding call is made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// The embedding provider failed or timed out.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    /// The index rejected the search (dimension mismatch, build failure).
    #[error(transparent)]
    Index(#[from] IndexError),
}
