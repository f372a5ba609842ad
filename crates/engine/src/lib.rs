//! # medmatch engine
//!
//! ## Purpose
//!
//! `engine` sits on top of the corpus index (`index`) and the embedding
//! layer (`embedding`). It turns a patient's free-text query into a query
//! vector plus a structured filter, runs the similarity search, imposes a
//! deterministic total order on the results, and shapes the final
//! recommendation, optionally asking an LLM collaborator to explain the
//! match.
//!
//! In a typical deployment you will:
//! - Build a [`CorpusIndex`](index::CorpusIndex) from the full profile set.
//! - Hand it to a [`MatchEngine`] together with the same embedding provider
//!   used at build time.
//! - Serve queries through [`MatchEngine::search`] (ranked matches, no
//!   narrative) and [`MatchEngine::recommend`] (primary + alternates +
//!   optional explanation). These two calls are the entire surface an HTTP
//!   layer needs to bind to.
//!
//! ## Core types
//!
//! - [`QuerySpec`]: query text, optional structured filters, result count.
//! - [`ScoredMatch`]: profile reference, score in [0, 1], gapless 1-based
//!   rank, satisfied filter fields.
//! - [`Recommendation`] / [`RecommendOutcome`]: the assembled answer, with
//!   "no matches" as an explicit valid outcome rather than an error.
//! - [`MatchEngine`]: owns the corpus snapshot and the collaborators.
//!
//! ## Determinism
//!
//! For a fixed corpus and embedding provider, identical specs produce
//! identical ordered results (scores, order, and ranks). Ties are broken by
//! experience then identifier, never arbitrarily.

mod assemble;
mod engine;
mod error;
mod explain;
mod planner;
mod ranker;
mod types;

pub use crate::assemble::assemble;
pub use crate::engine::{EngineConfig, MatchEngine};
pub use crate::error::EngineError;
pub use crate::explain::{ApiExplainer, ExplainConfig, ExplainError, ExplanationProvider};
pub use crate::planner::{plan, PlannedQuery};
pub use crate::ranker::{rank, SCORE_EPSILON};
pub use crate::types::{
    QuerySpec, Recommendation, RecommendOutcome, ScoredMatch, DEFAULT_LIMIT, MAX_LIMIT,
};
