//! Structured-attribute filtering.
//!
//! A [`ProfileFilter`] is a conjunction over a profile's structured fields.
//! Unset fields are always-true, so an empty filter admits the whole corpus.
//! Matching is exact on normalized strings; there is deliberately no fuzzy
//! or partial location matching.

use serde::{Deserialize, Serialize};

use profile::{normalize_text, Profile};

/// The structured fields a filter can constrain. Carried on returned matches
/// so callers can explain why an entry qualified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Location,
    Specialty,
    Language,
    MinExperience,
}

/// Conjunction of optional structured predicates over a profile.
///
/// Constructed via [`ProfileFilter::new`], which normalizes the requested
/// strings with the same normalizer applied to profile fields, keeping
/// comparisons consistent with the embedding text space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileFilter {
    location: Option<String>,
    specialty: Option<String>,
    language: Option<String>,
    min_experience: Option<u32>,
}

impl ProfileFilter {
    /// Builds a filter from raw (un-normalized) request fields. Blank
    /// strings are treated as unset.
    pub fn new(
        location: Option<&str>,
        specialty: Option<&str>,
        language: Option<&str>,
        min_experience: Option<u32>,
    ) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(normalize_text)
                .filter(|normalized| !normalized.is_empty())
        };
        Self {
            location: clean(location),
            specialty: clean(specialty),
            language: clean(language),
            min_experience,
        }
    }

    /// True when no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.specialty.is_none()
            && self.language.is_none()
            && self.min_experience.is_none()
    }

    /// Evaluates the conjunction against one profile.
    ///
    /// - location: case-insensitive exact match on the normalized string
    /// - specialty: case-insensitive exact match against primary OR
    ///   sub-specialty
    /// - language: membership in the profile's language set
    /// - experience: `years_experience >= min`
    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(location) = &self.location {
            if normalize_text(&profile.location) != *location {
                return false;
            }
        }
        if let Some(specialty) = &self.specialty {
            let primary = normalize_text(&profile.specialty);
            let sub = normalize_text(&profile.sub_specialty);
            if primary != *specialty && sub != *specialty {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !profile.speaks(language) {
                return false;
            }
        }
        if let Some(min) = self.min_experience {
            if profile.years_experience < min {
                return false;
            }
        }
        true
    }

    /// The fields this filter actually constrains, in declaration order.
    /// Every profile admitted by [`matches`](Self::matches) satisfied
    /// exactly these.
    pub fn satisfied_fields(&self) -> Vec<FilterField> {
        let mut fields = Vec::new();
        if self.location.is_some() {
            fields.push(FilterField::Location);
        }
        if self.specialty.is_some() {
            fields.push(FilterField::Specialty);
        }
        if self.language.is_some() {
            fields.push(FilterField::Language);
        }
        if self.min_experience.is_some() {
            fields.push(FilterField::MinExperience);
        }
        fields
    }
}
