//! Query planning: turn a spec into a vector, a filter, and a result count.

use std::time::Duration;

use embedding::{embed_with_timeout, EmbeddingProvider};
use index::ProfileFilter;
use profile::normalize_text;

use crate::error::EngineError;
use crate::types::QuerySpec;

/// A query ready to run against the index.
#[derive(Debug, Clone)]
pub struct PlannedQuery {
    /// Embedding of the normalized query text.
    pub vector: Vec<f32>,
    /// Conjunction of the spec's structured filters.
    pub filter: ProfileFilter,
    /// Effective result count: the bounded limit clamped to corpus size.
    pub top_k: usize,
}

/// Builds a query vector and filter predicate from a [`QuerySpec`].
///
/// The query text goes through the same normalizer as profile summaries
/// before embedding, so comparisons happen in one text space. Validation
/// runs first: an empty-after-normalization query is rejected with
/// [`EngineError::InvalidQuery`] before the embedding provider is touched.
/// The embedding call is bounded by `timeout`; a timeout or provider failure
/// fails the whole query.
pub async fn plan(
    spec: &QuerySpec,
    provider: &dyn EmbeddingProvider,
    corpus_size: usize,
    timeout: Duration,
) -> Result<PlannedQuery, EngineError> {
    let normalized = normalize_text(&spec.text);
    if normalized.is_empty() {
        return Err(EngineError::InvalidQuery(
            "query text is empty after normalization".into(),
        ));
    }

    let filter = ProfileFilter::new(
        spec.location.as_deref(),
        spec.specialty.as_deref(),
        spec.language.as_deref(),
        spec.min_experience,
    );
    let top_k = spec.bounded_limit().min(corpus_size).max(1);

    tracing::debug!(
        top_k,
        filtered = !filter.is_empty(),
        "planning query"
    );

    let vector = embed_with_timeout(provider, &normalized, timeout).await?;
    Ok(PlannedQuery {
        vector,
        filter,
        top_k,
    })
}
