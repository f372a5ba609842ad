use thiserror::Error;

/// Errors surfaced by embedding providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    /// The provider call itself failed (network, HTTP status, upstream
    /// model error). Propagated to the caller as a failed query; the core
    /// never retries.
    #[error("embedding provider failure: {0}")]
    Provider(String),
    /// The provider did not answer within the caller-supplied timeout.
    #[error("embedding call timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },
    /// The provider answered with something that is not a usable vector.
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
    /// Provider configuration is inconsistent (e.g. API mode without a URL).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
}
