use serde::{Deserialize, Serialize};

use crate::DEFAULT_DIMENSION;

/// Runtime configuration for embedding providers.
///
/// One config drives every provider kind; fields that a given provider does
/// not use are simply ignored (the stub never touches `api_url`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Friendly model label carried for observability.
    pub model_name: String,
    /// Vector dimension every call must produce.
    pub dimension: usize,
    /// L2-normalize vectors to unit length (recommended for cosine
    /// similarity).
    pub normalize: bool,
    /// Inference endpoint for [`ApiEmbedder`](crate::ApiEmbedder).
    pub api_url: Option<String>,
    /// Authorization header value, e.g. `"Bearer hf_xxx"`.
    pub api_auth_header: Option<String>,
    /// Remote provider hint: `"hf"`, `"openai"`, or `"custom"` (default).
    pub api_provider: Option<String>,
    /// Capacity of the LRU cache used by
    /// [`CachedProvider`](crate::CachedProvider).
    pub cache_capacity: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: "all-MiniLM-L6-v2".into(),
            dimension: DEFAULT_DIMENSION,
            normalize: true,
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            cache_capacity: 1024,
        }
    }
}

impl EmbeddingConfig {
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_api_auth_header(mut self, header: impl Into<String>) -> Self {
        self.api_auth_header = Some(header.into());
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_minilm() {
        let cfg = EmbeddingConfig::default();
        assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
        assert_eq!(cfg.dimension, 384);
        assert!(cfg.normalize);
        assert!(cfg.api_url.is_none());
    }

    #[test]
    fn builder_chains() {
        let cfg = EmbeddingConfig::default()
            .with_dimension(768)
            .with_model_name("bge-base-en-v1.5")
            .with_normalize(false)
            .with_api_url("https://example.com/embed")
            .with_cache_capacity(64);
        assert_eq!(cfg.dimension, 768);
        assert_eq!(cfg.model_name, "bge-base-en-v1.5");
        assert!(!cfg.normalize);
        assert_eq!(cfg.api_url.as_deref(), Some("https://example.com/embed"));
        assert_eq!(cfg.cache_capacity, 64);
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = EmbeddingConfig::default().with_api_auth_header("Bearer token");
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EmbeddingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
