//! The caller-facing match engine.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use embedding::EmbeddingProvider;
use index::CorpusIndex;

use crate::assemble::assemble;
use crate::error::EngineError;
use crate::explain::ExplanationProvider;
use crate::planner::plan;
use crate::ranker::rank;
use crate::types::{QuerySpec, RecommendOutcome, ScoredMatch};

/// Per-engine tuning: timeouts for the two external calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Bound on each embedding call, in milliseconds. Exceeding it fails the
    /// query.
    pub embed_timeout_ms: u64,
    /// Bound on each explanation call, in milliseconds. Exceeding it drops
    /// the narrative, nothing else.
    pub explain_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            embed_timeout_ms: 10_000,
            explain_timeout_ms: 20_000,
        }
    }
}

impl EngineConfig {
    pub fn with_embed_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.embed_timeout_ms = timeout_ms;
        self
    }

    pub fn with_explain_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.explain_timeout_ms = timeout_ms;
        self
    }

    fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }

    fn explain_timeout(&self) -> Duration {
        Duration::from_millis(self.explain_timeout_ms)
    }
}

/// Retrieval entry points over a shared immutable corpus snapshot.
///
/// Concurrency contract: queries clone the current `Arc<CorpusIndex>` and
/// run against it lock-free, so any number of queries proceed in parallel
/// without coordination. The only mutation is [`swap_corpus`](Self::swap_corpus),
/// which replaces the snapshot wholesale. Readers never observe a partially
/// rebuilt index; in-flight queries simply finish against the snapshot they
/// started with.
pub struct MatchEngine {
    corpus: RwLock<Arc<CorpusIndex>>,
    provider: Arc<dyn EmbeddingProvider>,
    explainer: Option<Arc<dyn ExplanationProvider>>,
    cfg: EngineConfig,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine").finish_non_exhaustive()
    }
}

impl MatchEngine {
    pub fn new(corpus: CorpusIndex, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(corpus, provider, EngineConfig::default())
    }

    pub fn with_config(
        corpus: CorpusIndex,
        provider: Arc<dyn EmbeddingProvider>,
        cfg: EngineConfig,
    ) -> Self {
        Self {
            corpus: RwLock::new(Arc::new(corpus)),
            provider,
            explainer: None,
            cfg,
        }
    }

    /// Wires in the optional explanation collaborator.
    pub fn with_explainer(mut self, explainer: Arc<dyn ExplanationProvider>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    /// The current corpus snapshot.
    pub fn snapshot(&self) -> Arc<CorpusIndex> {
        self.corpus
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the corpus with a fully built new index, returning the old
    /// snapshot. The new index must already be complete; this is the swap-in
    /// discipline, not incremental mutation.
    pub fn swap_corpus(&self, corpus: CorpusIndex) -> Arc<CorpusIndex> {
        let next = Arc::new(corpus);
        let mut guard = self
            .corpus
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            previous_size = previous.len(),
            current_size = guard.len(),
            "corpus snapshot swapped"
        );
        previous
    }

    /// Ranked retrieval without the explanation step.
    pub async fn search(&self, spec: &QuerySpec) -> Result<Vec<ScoredMatch>, EngineError> {
        let corpus = self.snapshot();
        let planned = plan(spec, self.provider.as_ref(), corpus.len(), self.cfg.embed_timeout())
            .await?;
        let hits = corpus.search(&planned.vector, planned.top_k, &planned.filter)?;
        let ranked = rank(hits, &planned.filter);
        tracing::debug!(results = ranked.len(), requested = planned.top_k, "search complete");
        Ok(ranked)
    }

    /// Full retrieval: search, rank, assemble, explain.
    ///
    /// Returns [`RecommendOutcome::NoMatches`] when the filter/similarity
    /// combination yields nothing: a valid outcome, distinct from every
    /// failure.
    pub async fn recommend(&self, spec: &QuerySpec) -> Result<RecommendOutcome, EngineError> {
        let ranked = self.search(spec).await?;
        match assemble(
            &spec.text,
            ranked,
            self.explainer.as_deref(),
            self.cfg.explain_timeout(),
        )
        .await
        {
            Some(recommendation) => Ok(RecommendOutcome::Recommendation(recommendation)),
            None => Ok(RecommendOutcome::NoMatches),
        }
    }
}
