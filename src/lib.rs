//! Workspace umbrella crate for medmatch.
//!
//! Stitches the pipeline crates together so callers can go from a profile
//! dataset to a query-serving engine with a single API entry point:
//!
//! ```text
//! profiles ──▶ encode ──▶ embed ──▶ CorpusIndex     (build time)
//! query  ──▶ plan ──▶ embed ──▶ search ──▶ rank ──▶ assemble   (query time)
//! ```
//!
//! The individual layers live in their own crates (`profile`, `embedding`,
//! `index`, `engine`) and are re-exported here.

pub use embedding::{
    embed_with_timeout, ApiEmbedder, CachedProvider, EmbeddingConfig, EmbeddingError,
    EmbeddingProvider, FixedEmbedder, StubEmbedder, DEFAULT_DIMENSION,
};
pub use engine::{
    ApiExplainer, EngineConfig, EngineError, ExplainConfig, ExplanationProvider, MatchEngine,
    QuerySpec, Recommendation, RecommendOutcome, ScoredMatch,
};
pub use index::{
    AnnParams, CorpusIndex, EncodedProfile, FilterField, IndexConfig, IndexError, ProfileFilter,
    SearchHit, StoreKind,
};
pub use profile::{
    collapse_whitespace, encode_profile, normalize_text, validate_corpus, CorpusIssue, Profile,
    ProfileError,
};

use std::sync::Arc;

use thiserror::Error;

/// Errors from the umbrella helpers.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The profile dataset could not be parsed.
    #[error("failed to parse profile dataset: {0}")]
    Dataset(#[from] serde_json::Error),
    /// Corpus build failed (validation, embedding, dimension).
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Parses a profile dataset from its JSON export (an array of profile
/// objects in the upstream dataset schema).
pub fn load_profiles(json: &str) -> Result<Vec<Profile>, PipelineError> {
    let profiles: Vec<Profile> = serde_json::from_str(json)?;
    tracing::info!(profiles = profiles.len(), "loaded profile dataset");
    Ok(profiles)
}

/// Builds a corpus index and wraps it in a ready-to-serve [`MatchEngine`].
///
/// The provider handed in here is the one the engine keeps for query-time
/// embedding, which guarantees build-time and query-time vectors come from
/// the same model.
pub async fn build_engine(
    profiles: Vec<Profile>,
    provider: Arc<dyn EmbeddingProvider>,
    index_cfg: IndexConfig,
    engine_cfg: EngineConfig,
) -> Result<MatchEngine, PipelineError> {
    let corpus = CorpusIndex::build(profiles, provider.as_ref(), index_cfg).await?;
    Ok(MatchEngine::with_config(corpus, provider, engine_cfg))
}

/// [`build_engine`] with default configuration. The index dimension is
/// taken from the provider, so the two cannot disagree.
pub async fn build_engine_default(
    profiles: Vec<Profile>,
    provider: Arc<dyn EmbeddingProvider>,
) -> Result<MatchEngine, PipelineError> {
    let index_cfg = IndexConfig::default().with_dimension(provider.dimension());
    build_engine(profiles, provider, index_cfg, EngineConfig::default()).await
}
