//! Deterministic test/offline providers.
//!
//! Both providers count their calls so tests can assert that a rejected
//! query never reached the embedding layer.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fxhash::hash64;

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;
use crate::normalize::l2_normalize_in_place;
use crate::EmbeddingProvider;

/// Deterministic hash-derived provider.
///
/// Vectors are sinusoids seeded from a hash of the input text: cheap,
/// reproducible across platforms, and distinct texts land on distinct
/// vectors with overwhelming probability. Useful for tests and for running
/// the pipeline with no model wired in.
pub struct StubEmbedder {
    cfg: EmbeddingConfig,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(cfg: EmbeddingConfig) -> Self {
        Self {
            cfg,
            calls: AtomicUsize::new(0),
        }
    }

    /// Stub with the default config at an explicit dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self::new(EmbeddingConfig::default().with_dimension(dimension))
    }

    /// Number of `embed` invocations so far (batch calls count once per
    /// text).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn make_vector(&self, text: &str) -> Vec<f32> {
        let seed = hash64(text.as_bytes());
        let mut vector = vec![0f32; self.cfg.dimension];
        for (idx, value) in vector.iter_mut().enumerate() {
            *value = ((seed >> (idx % 32)) as f32 * 0.0001 + idx as f32 * 0.01).sin();
        }
        if self.cfg.normalize {
            l2_normalize_in_place(&mut vector);
        }
        vector
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(EmbeddingConfig::default())
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn dimension(&self) -> usize {
        self.cfg.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.make_vector(text))
    }
}

/// Scripted provider: routes texts to caller-supplied vectors by keyword.
///
/// `embed` returns the vector of the first route whose keyword occurs in the
/// input text, falling back to a fixed default vector. Tests use this to pin
/// exact similarity relationships ("the cardiology summaries sit closer to
/// this query than the pulmonology one") without a real model.
pub struct FixedEmbedder {
    dimension: usize,
    routes: Vec<(String, Vec<f32>)>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(dimension: usize) -> Self {
        let mut fallback = vec![0f32; dimension];
        if let Some(first) = fallback.first_mut() {
            *first = 1.0;
        }
        Self {
            dimension,
            routes: Vec::new(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adds a keyword route. Routes are checked in insertion order.
    ///
    /// # Panics
    /// Panics if the vector dimension disagrees with the embedder's; this is
    /// a test-harness construction error.
    pub fn route(mut self, keyword: impl Into<String>, vector: Vec<f32>) -> Self {
        assert_eq!(
            vector.len(),
            self.dimension,
            "route vector dimension must match embedder dimension"
        );
        self.routes.push((keyword.into(), vector));
        self
    }

    /// Replaces the fallback vector returned when no route matches.
    pub fn fallback(mut self, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dimension);
        self.fallback = vector;
        self
    }

    /// Number of `embed` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for (keyword, vector) in &self.routes {
            if text.contains(keyword.as_str()) {
                return Ok(vector.clone());
            }
        }
        Ok(self.fallback.clone())
    }
}
