use std::fmt;

use thiserror::Error;

/// A single structural violation found while validating a corpus.
///
/// Issues carry the offending identifier (or the record position when the
/// identifier itself is blank) so a failed load can report every bad record
/// at once instead of dying on the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusIssue {
    /// The profile at `position` has a blank identifier.
    BlankId { position: usize },
    /// Two or more profiles share the same identifier.
    DuplicateId { id: String },
    /// A required text field is empty after normalization.
    EmptyField { id: String, field: &'static str },
    /// The spoken-language set is empty.
    NoLanguages { id: String },
}

impl fmt::Display for CorpusIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusIssue::BlankId { position } => {
                write!(f, "profile at position {position} has a blank identifier")
            }
            CorpusIssue::DuplicateId { id } => write!(f, "duplicate identifier {id}"),
            CorpusIssue::EmptyField { id, field } => {
                write!(f, "{id}: field `{field}` is empty after normalization")
            }
            CorpusIssue::NoLanguages { id } => write!(f, "{id}: language set is empty"),
        }
    }
}

/// Errors produced by the profile layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The corpus contains structurally invalid profiles. This is a
    /// programming/data error and aborts corpus construction; the listing
    /// names every offending record.
    #[error("invalid corpus: {}", format_issues(.0))]
    InvalidCorpus(Vec<CorpusIssue>),
}

fn format_issues(issues: &[CorpusIssue]) -> String {
    let rendered: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
    rendered.join("; ")
}
