//! Optional explanation collaborator.
//!
//! A best-effort narrative generator: given the patient's query and the
//! summaries of the returned matches, produce a human-readable explanation
//! of why the top doctor fits. The engine works identically with or without
//! one wired in; every failure path degrades to an explanation-less
//! recommendation.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors from the explanation collaborator. Never propagated past the
/// assembler; they are logged and swallowed.
#[derive(Debug, Error, Clone)]
pub enum ExplainError {
    #[error("explanation provider failure: {0}")]
    Provider(String),
    #[error("invalid explanation response: {0}")]
    InvalidResponse(String),
}

/// Generates a free-text explanation for a set of match summaries.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        query_text: &str,
        match_summaries: &[String],
    ) -> Result<String, ExplainError>;
}

/// Configuration for the HTTP chat-completions explainer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplainConfig {
    /// Chat-completions endpoint.
    pub api_url: String,
    /// Authorization header value, e.g. `"Bearer sk-..."`.
    pub api_auth_header: Option<String>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response length cap.
    pub max_tokens: u32,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            api_auth_header: None,
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }
}

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client")
});

const SYSTEM_PROMPT: &str = "You are a medical assistant helping to match patients \
with the most suitable doctors. Based on the patient's symptoms and the candidate \
profiles, explain which doctor fits best and why, considering specialty match, \
experience, location, and specific expertise. Always include a disclaimer that this \
is for informational purposes and patients should verify credentials.";

/// Chat-completions-backed explanation provider.
pub struct ApiExplainer {
    cfg: ExplainConfig,
}

impl ApiExplainer {
    pub fn new(cfg: ExplainConfig) -> Self {
        Self { cfg }
    }

    fn build_user_prompt(query_text: &str, match_summaries: &[String]) -> String {
        let mut prompt = format!("Patient query: {query_text}\n\nCandidate doctors (ranked by relevance):\n");
        for (position, summary) in match_summaries.iter().enumerate() {
            prompt.push_str(&format!("\nCandidate {}: {summary}\n", position + 1));
        }
        prompt.push_str(
            "\nExplain the top recommendation, why it fits the patient's needs, \
             and name the alternatives worth considering.",
        );
        prompt
    }

    fn parse_content(value: Value) -> Result<String, ExplainError> {
        value
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ExplainError::InvalidResponse("missing choices[0].message.content".into())
            })
    }
}

#[async_trait]
impl ExplanationProvider for ApiExplainer {
    async fn explain(
        &self,
        query_text: &str,
        match_summaries: &[String],
    ) -> Result<String, ExplainError> {
        let payload = json!({
            "model": self.cfg.model,
            "temperature": self.cfg.temperature,
            "max_tokens": self.cfg.max_tokens,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::build_user_prompt(query_text, match_summaries) },
            ],
        });

        let mut request = HTTP_CLIENT.post(&self.cfg.api_url).json(&payload);
        if let Some(auth) = &self.cfg.api_auth_header {
            request = request.header("Authorization", auth.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExplainError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Provider(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;
        Self::parse_content(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_numbers_candidates() {
        let prompt = ApiExplainer::build_user_prompt(
            "chest pain",
            &["cardiology specialist".into(), "pulmonology specialist".into()],
        );
        assert!(prompt.contains("Patient query: chest pain"));
        assert!(prompt.contains("Candidate 1: cardiology specialist"));
        assert!(prompt.contains("Candidate 2: pulmonology specialist"));
    }

    #[test]
    fn parse_content_reads_chat_shape() {
        let value = json!({
            "choices": [ { "message": { "content": "Dr. A is the best fit." } } ]
        });
        assert_eq!(
            ApiExplainer::parse_content(value).unwrap(),
            "Dr. A is the best fit."
        );
    }

    #[test]
    fn parse_content_rejects_empty_choices() {
        let err = ApiExplainer::parse_content(json!({"choices": []})).expect_err("rejected");
        assert!(matches!(err, ExplainError::InvalidResponse(_)));
    }

    #[test]
    fn config_defaults() {
        let cfg = ExplainConfig::default();
        assert!(cfg.api_url.contains("chat/completions"));
        assert_eq!(cfg.max_tokens, 800);
    }
}
