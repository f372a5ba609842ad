//! Profile summary encoding.
//!
//! The encoder flattens a profile into one normalized string that the
//! embedding provider consumes. Field order is fixed and sparse fields
//! contribute an empty segment instead of being skipped, so vector distances
//! stay comparable across profiles regardless of which optional text is
//! present.

use crate::normalize::normalize_text;
use crate::types::Profile;

/// Builds the embedding input text for a profile.
///
/// Deterministic: the same profile always yields the same summary. The field
/// order is specialty, sub-specialty, institution, location, experience,
/// languages, clinical summary, expertise. The result is passed through
/// [`normalize_text`](crate::normalize_text), the same normalizer applied to
/// query text.
pub fn encode_profile(profile: &Profile) -> String {
    let languages = profile.languages.join(", ");

    let raw = format!(
        "{} specialist subspecialty in {} practicing at {} located in {} \
         with {} years of experience Languages: {} {} {}",
        profile.specialty,
        profile.sub_specialty,
        profile.institution,
        profile.location,
        profile.years_experience,
        languages,
        profile.summary,
        profile.expertise,
    );

    normalize_text(&raw)
}
