//! medmatch corpus index.
//!
//! Owns the encoded corpus: every profile paired with its derived summary
//! text and embedding vector, plus a pluggable nearest-neighbor backend.
//! The index defines the filter/query contract; the backend only ranks by
//! cosine.
//!
//! ## Core guarantees
//!
//! - **Built wholesale**: [`CorpusIndex::build`] encodes and embeds the full
//!   profile set in one batch; there is no incremental mutation. Refreshing
//!   the corpus means building a new index and swapping it in.
//! - **Dimension discipline**: the configured dimension is enforced against
//!   the provider at build time and against every query vector, failing fast
//!   on mismatch rather than returning garbage rankings.
//! - **Score normalization**: backends speak raw cosine; the index maps it
//!   to [0, 1] in exactly one place ([`CorpusIndex::search`]).
//! - **Honest result counts**: fewer filter-satisfying profiles than `top_k`
//!   means fewer results. An empty result is a valid answer, not an error.
//!
//! ## Example
//!
//! ```no_run
//! use embedding::StubEmbedder;
//! use index::{CorpusIndex, IndexConfig, ProfileFilter};
//!
//! # async fn run(profiles: Vec<profile::Profile>) -> Result<(), index::IndexError> {
//! let provider = StubEmbedder::with_dimension(384);
//! let corpus = CorpusIndex::build(profiles, &provider, IndexConfig::default()).await?;
//!
//! let query = vec![0.0; 384];
//! let hits = corpus.search(&query, 5, &ProfileFilter::default())?;
//! for hit in hits {
//!     println!("{} {:.4}", hit.entry.profile.id, hit.similarity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod ann;
mod error;
mod filter;
mod store;

pub use crate::ann::{AnnParams, HnswStore};
pub use crate::error::IndexError;
pub use crate::filter::{FilterField, ProfileFilter};
pub use crate::store::{BruteForceStore, VectorStore};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use embedding::{embed_batch_with_timeout, EmbeddingError, EmbeddingProvider};
use profile::{encode_profile, validate_corpus, Profile};

/// A profile plus its derived representations. Owned by the index; derived
/// deterministically, so rebuilding from the same profiles and provider
/// reproduces it bit-for-bit.
#[derive(Debug, Clone)]
pub struct EncodedProfile {
    pub profile: Profile,
    /// Normalized summary text fed to the embedding provider.
    pub summary: String,
    /// Embedding of `summary`.
    pub vector: Vec<f32>,
}

/// One search result: an encoded profile and its similarity in [0, 1].
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry: Arc<EncodedProfile>,
    pub similarity: f32,
}

/// Which nearest-neighbor backend the index uses.
#[derive(Debug, Clone, Copy, Default)]
pub enum StoreKind {
    /// Exact linear scan (default; deterministic and fine into the tens of
    /// thousands of profiles).
    #[default]
    Exact,
    /// HNSW graph with post-filtering.
    Hnsw(AnnParams),
}

/// Configuration for building a corpus index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Embedding dimension every stored and query vector must have.
    pub dimension: usize,
    /// Timeout for the batch embedding call during a build, in milliseconds.
    pub embed_timeout_ms: u64,
    /// Backend selection. Not serialized; runtime wiring.
    #[serde(skip)]
    pub store: StoreKind,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: embedding::DEFAULT_DIMENSION,
            embed_timeout_ms: 30_000,
            store: StoreKind::Exact,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    pub fn with_embed_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.embed_timeout_ms = timeout_ms;
        self
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }
}

/// The encoded, searchable corpus. Immutable once built; share it behind an
/// `Arc` and swap the whole thing to refresh.
pub struct CorpusIndex {
    entries: Vec<Arc<EncodedProfile>>,
    by_id: hashbrown::HashMap<String, usize>,
    store: Box<dyn VectorStore>,
    cfg: IndexConfig,
}

impl std::fmt::Debug for CorpusIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusIndex")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl CorpusIndex {
    /// Encodes and embeds the full profile set, then loads the backend.
    ///
    /// Fails with [`IndexError::CorpusEmpty`] for zero profiles, with the
    /// complete violation listing for an invalid corpus, and with
    /// [`IndexError::DimensionMismatch`] when the provider and config
    /// disagree on dimension. The embedding call is bounded by
    /// `cfg.embed_timeout_ms` and a timeout fails the build.
    pub async fn build(
        profiles: Vec<Profile>,
        provider: &dyn EmbeddingProvider,
        cfg: IndexConfig,
    ) -> Result<Self, IndexError> {
        if profiles.is_empty() {
            return Err(IndexError::CorpusEmpty);
        }
        validate_corpus(&profiles)?;

        if provider.dimension() != cfg.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: cfg.dimension,
                got: provider.dimension(),
            });
        }

        let summaries: Vec<String> = profiles.iter().map(encode_profile).collect();
        let vectors =
            embed_batch_with_timeout(provider, &summaries, cfg.embed_timeout()).await?;
        if vectors.len() != profiles.len() {
            return Err(IndexError::Embedding(EmbeddingError::InvalidResponse(
                format!(
                    "provider returned {} vectors for {} profiles",
                    vectors.len(),
                    profiles.len()
                ),
            )));
        }

        let mut store: Box<dyn VectorStore> = match cfg.store {
            StoreKind::Exact => Box::new(BruteForceStore::new()),
            StoreKind::Hnsw(params) => Box::new(HnswStore::new(params)),
        };

        let mut entries = Vec::with_capacity(profiles.len());
        let mut by_id = hashbrown::HashMap::with_capacity(profiles.len());

        for ((profile, summary), vector) in
            profiles.into_iter().zip(summaries).zip(vectors)
        {
            if vector.len() != cfg.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: cfg.dimension,
                    got: vector.len(),
                });
            }
            store.upsert(profile.id.clone(), vector.clone());
            by_id.insert(profile.id.clone(), entries.len());
            entries.push(Arc::new(EncodedProfile {
                profile,
                summary,
                vector,
            }));
        }
        store.seal();

        tracing::info!(
            profiles = entries.len(),
            dimension = cfg.dimension,
            "corpus index built"
        );

        Ok(Self {
            entries,
            by_id,
            store,
            cfg,
        })
    }

    /// Top-`top_k` profiles most similar to `query_vector`, restricted to
    /// those satisfying `filter`.
    ///
    /// Similarity is cosine mapped to [0, 1] via `(cosine + 1) / 2`. This is
    /// the one normalization used everywhere in this engine, so build-time
    /// and query-time scores are directly comparable. Returns all matches
    /// when fewer than `top_k` satisfy the filter and an empty vector when
    /// none do.
    pub fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filter: &ProfileFilter,
    ) -> Result<Vec<SearchHit>, IndexError> {
        if query_vector.len() != self.cfg.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.cfg.dimension,
                got: query_vector.len(),
            });
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let predicate = |id: &str| {
            self.by_id
                .get(id)
                .map(|&slot| filter.matches(&self.entries[slot].profile))
                .unwrap_or(false)
        };

        let raw = self.store.query(query_vector, top_k, &predicate);
        let hits = raw
            .into_iter()
            .filter_map(|(id, cosine)| {
                let &slot = self.by_id.get(&id)?;
                Some(SearchHit {
                    entry: Arc::clone(&self.entries[slot]),
                    similarity: (cosine + 1.0) / 2.0,
                })
            })
            .collect();
        Ok(hits)
    }

    /// Number of profiles in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured embedding dimension.
    pub fn dimension(&self) -> usize {
        self.cfg.dimension
    }

    /// Looks up an encoded profile by identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<EncodedProfile>> {
        self.by_id.get(id).map(|&slot| &self.entries[slot])
    }

    /// Iterates the encoded corpus in load order.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<EncodedProfile>> {
        self.entries.iter()
    }
}
