//! The doctor-profile data model.
//!
//! `Profile` is the unit of the corpus. Records are created during corpus
//! load and never mutated; a corpus refresh replaces the whole set. The serde
//! field names match the upstream dataset schema so a dataset export can be
//! deserialized directly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CorpusIssue, ProfileError};
use crate::normalize::normalize_text;

/// A single doctor profile.
///
/// Invariants (enforced by [`validate_corpus`] before any index build):
/// identifiers are unique and non-blank across the corpus, every text field
/// is non-empty after normalization, and the language set has at least one
/// entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Stable unique identifier, e.g. `DOC-00042`.
    #[serde(rename = "doctor_id")]
    pub id: String,
    /// Display name, e.g. `Dr. Elena Park`.
    pub name: String,
    /// Primary specialty, e.g. `Cardiology`.
    #[serde(rename = "primary_specialty")]
    pub specialty: String,
    /// Sub-specialty within the primary, e.g. `Interventional Cardiology`.
    pub sub_specialty: String,
    /// City/region string, e.g. `New York, NY`.
    pub location: String,
    /// Affiliated institution.
    #[serde(rename = "hospital_affiliation")]
    pub institution: String,
    /// Years of experience.
    #[serde(rename = "years_of_experience")]
    pub years_experience: u32,
    /// Spoken languages; membership checks are case-insensitive.
    #[serde(rename = "language_fluency")]
    pub languages: Vec<String>,
    /// Free-text clinical summary.
    #[serde(rename = "critical_surgeries_summary")]
    pub summary: String,
    /// Free-text expertise description.
    #[serde(rename = "special_interests_and_expertise")]
    pub expertise: String,
}

impl Profile {
    /// True when the profile speaks `language` (case-insensitive exact match
    /// on the normalized language string).
    pub fn speaks(&self, language: &str) -> bool {
        let wanted = normalize_text(language);
        self.languages
            .iter()
            .any(|spoken| normalize_text(spoken) == wanted)
    }
}

/// Validates a corpus wholesale, collecting every violation.
///
/// Returns `Ok(())` only when the whole set is clean; otherwise the error
/// carries the complete issue listing so the operator can fix the dataset in
/// one pass. An invalid corpus is a data bug, not a runtime condition, and
/// aborts corpus construction.
pub fn validate_corpus(profiles: &[Profile]) -> Result<(), ProfileError> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(profiles.len());

    for (position, profile) in profiles.iter().enumerate() {
        if profile.id.trim().is_empty() {
            issues.push(CorpusIssue::BlankId { position });
            continue;
        }
        if !seen.insert(profile.id.as_str()) {
            issues.push(CorpusIssue::DuplicateId {
                id: profile.id.clone(),
            });
        }

        for (field, value) in [
            ("name", &profile.name),
            ("specialty", &profile.specialty),
            ("sub_specialty", &profile.sub_specialty),
            ("location", &profile.location),
            ("institution", &profile.institution),
            ("summary", &profile.summary),
            ("expertise", &profile.expertise),
        ] {
            if normalize_text(value).is_empty() {
                issues.push(CorpusIssue::EmptyField {
                    id: profile.id.clone(),
                    field,
                });
            }
        }

        if profile.languages.is_empty()
            || profile
                .languages
                .iter()
                .all(|l| normalize_text(l).is_empty())
        {
            issues.push(CorpusIssue::NoLanguages {
                id: profile.id.clone(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(issue_count = issues.len(), "corpus validation failed");
        Err(ProfileError::InvalidCorpus(issues))
    }
}
