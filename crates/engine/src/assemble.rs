//! Recommendation assembly.
//!
//! Takes the ranked matches and shapes the final answer: first match as
//! primary, the rest as alternates, plus a best-effort narrative from the
//! explanation collaborator when one is wired in. The retrieval path never
//! fails because of the narrative: a missing, failing, or slow explainer
//! degrades to `explanation: None`.

use std::time::Duration;

use crate::explain::ExplanationProvider;
use crate::types::{Recommendation, ScoredMatch};

/// Assembles a [`Recommendation`] from ranked matches.
///
/// Returns `None` only when `ranked` is empty; the caller surfaces that as
/// an explicit no-match outcome, never as a recommendation with a missing
/// primary. The explainer receives the query text and the summary texts of
/// the returned matches (not the raw profiles), bounded by `timeout`.
pub async fn assemble(
    query_text: &str,
    ranked: Vec<ScoredMatch>,
    explainer: Option<&dyn ExplanationProvider>,
    timeout: Duration,
) -> Option<Recommendation> {
    let mut ranked = ranked.into_iter();
    let primary = ranked.next()?;
    let alternates: Vec<ScoredMatch> = ranked.collect();

    let explanation = match explainer {
        Some(explainer) => {
            let summaries: Vec<String> = std::iter::once(&primary)
                .chain(alternates.iter())
                .map(|m| m.entry.summary.clone())
                .collect();
            run_explainer(explainer, query_text, &summaries, timeout).await
        }
        None => None,
    };

    Some(Recommendation {
        primary,
        alternates,
        explanation,
    })
}

async fn run_explainer(
    explainer: &dyn ExplanationProvider,
    query_text: &str,
    summaries: &[String],
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, explainer.explain(query_text, summaries)).await {
        Ok(Ok(text)) => Some(text),
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "explanation provider failed; continuing without narrative");
            None
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "explanation call timed out; continuing without narrative"
            );
            None
        }
    }
}
