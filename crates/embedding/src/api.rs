//! Remote HTTP embedding provider.
//!
//! Talks to a feature-extraction endpoint: the Hugging Face router shape
//! (`[[f32]]` or `[f32]`) and the OpenAI embeddings shape
//! (`{"data": [{"embedding": [...]}]}`) are both understood. One pooled
//! client is shared process-wide.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;
use crate::normalize::l2_normalize_in_place;
use crate::EmbeddingProvider;

// Pooled process-wide HTTP client. The outer per-call timeout still applies
// via `embed_with_timeout`; these are transport-level bounds.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(16)
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Clone, Copy)]
enum ProviderKind {
    HuggingFace,
    OpenAi,
    Custom,
}

/// Embedding provider backed by a remote inference endpoint.
pub struct ApiEmbedder {
    cfg: EmbeddingConfig,
    url: String,
    kind: ProviderKind,
}

impl ApiEmbedder {
    /// Builds an API provider. Fails when the config carries no endpoint.
    pub fn new(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let url = cfg
            .api_url
            .clone()
            .ok_or_else(|| EmbeddingError::InvalidConfig("api_url is required".into()))?;
        let kind = match cfg.api_provider.as_deref().map(str::to_ascii_lowercase) {
            Some(ref p) if p == "hf" || p == "huggingface" => ProviderKind::HuggingFace,
            Some(ref p) if p == "openai" => ProviderKind::OpenAi,
            _ => ProviderKind::Custom,
        };
        Ok(Self { cfg, url, kind })
    }

    fn build_payload(&self, texts: &[String]) -> Value {
        match self.kind {
            ProviderKind::HuggingFace | ProviderKind::Custom => json!({ "inputs": texts }),
            ProviderKind::OpenAi => json!({
                "model": self.cfg.model_name,
                "input": texts,
            }),
        }
    }

    async fn request(&self, payload: Value) -> Result<Value, EmbeddingError> {
        let mut request = HTTP_CLIENT.post(&self.url).json(&payload);
        if let Some(auth) = &self.cfg.api_auth_header {
            request = request.header("Authorization", auth.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmbeddingError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))
    }

    fn parse_vectors(&self, value: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // OpenAI shape: {"data": [{"embedding": [...]}, ...]}
        if let Some(data) = value.get("data").and_then(Value::as_array) {
            return data
                .iter()
                .map(|entry| {
                    let array = entry
                        .get("embedding")
                        .and_then(Value::as_array)
                        .ok_or_else(|| {
                            EmbeddingError::InvalidResponse(
                                "data entry missing `embedding` array".into(),
                            )
                        })?;
                    parse_float_array(array)
                })
                .collect();
        }

        // HF shapes: [[f32, ...], ...] for batches or [f32, ...] for one text.
        if let Value::Array(outer) = value {
            if outer.iter().all(Value::is_array) {
                return outer
                    .iter()
                    .map(|row| parse_float_array(row.as_array().unwrap_or(&Vec::new())))
                    .collect();
            }
            return Ok(vec![parse_float_array(&outer)?]);
        }

        Err(EmbeddingError::InvalidResponse(
            "unrecognized response shape".into(),
        ))
    }

    fn finish(&self, mut vectors: Vec<Vec<f32>>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        for vector in &mut vectors {
            if vector.len() != self.cfg.dimension {
                return Err(EmbeddingError::InvalidResponse(format!(
                    "endpoint returned dimension {} but {} is configured",
                    vector.len(),
                    self.cfg.dimension
                )));
            }
            if self.cfg.normalize {
                l2_normalize_in_place(vector);
            }
        }
        Ok(vectors)
    }
}

fn parse_float_array(values: &[Value]) -> Result<Vec<f32>, EmbeddingError> {
    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| EmbeddingError::InvalidResponse("non-numeric element".into()))
        })
        .collect()
}

#[async_trait]
impl EmbeddingProvider for ApiEmbedder {
    fn dimension(&self) -> usize {
        self.cfg.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let payload = self.build_payload(std::slice::from_ref(&text.to_string()));
        let response = self.request(payload).await?;
        let vectors = self.parse_vectors(response)?;
        let mut vectors = self.finish(vectors)?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("endpoint returned no vectors".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let payload = self.build_payload(texts);
        let response = self.request(payload).await?;
        let vectors = self.parse_vectors(response)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "endpoint returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        self.finish(vectors)
    }
}
