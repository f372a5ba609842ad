//! LRU cache in front of an embedding provider.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lru::LruCache;

use crate::error::EmbeddingError;
use crate::EmbeddingProvider;

/// Caches text-to-vector lookups so repeated queries (and corpus rebuilds over
/// unchanged profiles) skip the provider round-trip. Keys are the exact
/// input text; callers are expected to normalize before embedding, which the
/// planner and encoder already do.
pub struct CachedProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl CachedProvider {
    /// Wraps `inner` with a cache of `capacity` entries (minimum 1).
    pub fn new(inner: Arc<dyn EmbeddingProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Current number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EmbeddingProvider for CachedProvider {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(vector) = cache.get(text) {
                tracing::debug!(len = text.len(), "embedding cache hit");
                return Ok(vector.clone());
            }
        }

        let vector = self.inner.embed(text).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(text.to_string(), vector.clone());
        }
        Ok(vector)
    }
}
