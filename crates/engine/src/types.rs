//! Request and result types for the match engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use index::{EncodedProfile, FilterField};

/// Hard ceiling on requested result counts.
pub const MAX_LIMIT: usize = 50;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 5;

/// A patient query: free-text symptoms plus optional structured filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuerySpec {
    /// Free-text symptom description. Required; rejected when empty after
    /// normalization.
    pub text: String,
    /// Exact location filter, e.g. `New York, NY`.
    #[serde(default)]
    pub location: Option<String>,
    /// Specialty filter, matched against primary or sub-specialty.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Required spoken language.
    #[serde(default)]
    pub language: Option<String>,
    /// Minimum years of experience (inclusive).
    #[serde(default)]
    pub min_experience: Option<u32>,
    /// Desired result count; clamped to `1..=50` and then to corpus size.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl QuerySpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
            specialty: None,
            language: None,
            min_experience: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_min_experience(mut self, years: u32) -> Self {
        self.min_experience = Some(years);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The requested limit clamped into the supported `1..=50` range.
    pub fn bounded_limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

/// A ranked match: profile reference, normalized score, 1-based rank, and
/// the filter fields the profile satisfied.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub entry: Arc<EncodedProfile>,
    /// Similarity in [0, 1], full precision.
    pub score: f32,
    /// 1-based position; strictly increasing, no gaps, no duplicates.
    pub rank: u32,
    /// The explicitly requested filter fields this profile satisfied.
    pub satisfied: Vec<FilterField>,
}

impl ScoredMatch {
    /// Score rounded to four decimals for display. Ordering always uses the
    /// full-precision [`score`](Self::score).
    pub fn display_score(&self) -> f32 {
        (self.score * 10_000.0).round() / 10_000.0
    }
}

/// The assembled answer for a `recommend` call.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Best match.
    pub primary: ScoredMatch,
    /// Remaining matches in rank order (up to N − 1).
    pub alternates: Vec<ScoredMatch>,
    /// Narrative from the explanation collaborator, when one is wired and
    /// answered in time.
    pub explanation: Option<String>,
}

/// Outcome of a `recommend` call. `NoMatches` means the filter/similarity
/// combination excluded everything. It is a valid answer, deliberately not
/// an error, so callers can render "no doctor found" instead of "search
/// failed".
#[derive(Debug)]
pub enum RecommendOutcome {
    Recommendation(Recommendation),
    NoMatches,
}

impl RecommendOutcome {
    pub fn is_no_matches(&self) -> bool {
        matches!(self, RecommendOutcome::NoMatches)
    }

    pub fn into_recommendation(self) -> Option<Recommendation> {
        match self {
            RecommendOutcome::Recommendation(r) => Some(r),
            RecommendOutcome::NoMatches => None,
        }
    }
}
