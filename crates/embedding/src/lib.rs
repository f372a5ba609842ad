//! medmatch embedding layer.
//!
//! Turns normalized text into fixed-length vectors. The engine only ever
//! talks to the [`EmbeddingProvider`] trait; what sits behind it is a
//! deployment choice:
//!
//! - **Stub mode**: [`StubEmbedder`] generates deterministic vectors from a
//!   text hash. No model, no network, fully reproducible. This is what tests
//!   use and what keeps the pipeline alive when no real provider is wired.
//! - **API mode**: [`ApiEmbedder`] calls a remote inference endpoint
//!   (Hugging Face router or OpenAI-style) over a pooled HTTP client.
//! - **Cached**: [`CachedProvider`] puts an LRU text-to-vector cache in
//!   front of any provider, which matters when the same query text arrives
//!   twice.
//!
//! The embedding call is the one external dependency that can hang, so every
//! call site goes through [`embed_with_timeout`]. There is deliberately no
//! retry here: the provider is a paid external call and retry policy belongs
//! to the caller.

pub mod config;
pub mod error;

mod api;
mod cache;
mod normalize;
mod stub;

pub use crate::api::ApiEmbedder;
pub use crate::cache::CachedProvider;
pub use crate::config::EmbeddingConfig;
pub use crate::error::EmbeddingError;
pub use crate::normalize::l2_normalize_in_place;
pub use crate::stub::{FixedEmbedder, StubEmbedder};

use std::time::Duration;

use async_trait::async_trait;

/// Default embedding dimension (all-MiniLM-L6-v2).
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic per input text for the lifetime of
/// one corpus: the index recomputes nothing, so a provider that drifts
/// between build time and query time silently breaks similarity semantics.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Vector dimension produced by every call.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed a batch, preserving input order. The default loops over
    /// [`embed`](Self::embed); providers with native batch endpoints
    /// override this.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

/// Runs `provider.embed(text)` bounded by `timeout`.
///
/// A timeout fails the whole query (the embedding is not optional), surfaced
/// as [`EmbeddingError::Timeout`].
pub async fn embed_with_timeout(
    provider: &dyn EmbeddingProvider,
    text: &str,
    timeout: Duration,
) -> Result<Vec<f32>, EmbeddingError> {
    match tokio::time::timeout(timeout, provider.embed(text)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "embedding call timed out");
            Err(EmbeddingError::Timeout {
                waited_ms: timeout.as_millis() as u64,
            })
        }
    }
}

/// Batch variant of [`embed_with_timeout`]; the timeout covers the whole
/// batch call.
pub async fn embed_batch_with_timeout(
    provider: &dyn EmbeddingProvider,
    texts: &[String],
    timeout: Duration,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match tokio::time::timeout(timeout, provider.embed_batch(texts)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                batch = texts.len(),
                "batch embedding call timed out"
            );
            Err(EmbeddingError::Timeout {
                waited_ms: timeout.as_millis() as u64,
            })
        }
    }
}
