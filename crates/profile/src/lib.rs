//! medmatch profile layer.
//!
//! This crate owns the doctor-profile data model and everything that turns a
//! profile into text the embedding layer can consume:
//!
//! - [`Profile`]: the immutable corpus record (serde-compatible with the
//!   upstream dataset schema).
//! - [`validate_corpus`]: collects every structural violation in a profile
//!   set before an index build is allowed to proceed.
//! - [`normalize_text`] / [`collapse_whitespace`]: the one text normalizer
//!   shared by profile summaries and patient queries, so both land in the
//!   same embedding space.
//! - [`encode_profile`]: the deterministic summary builder fed to the
//!   embedding provider.
//!
//! ## Pure function guarantee
//!
//! Nothing here does I/O or consults the clock or locale. Same profile, same
//! output, on any machine. Downstream stages (embedding, index, engine) rely
//! on this for reproducible corpus builds.

mod encoder;
mod error;
mod normalize;
mod types;

pub use crate::encoder::encode_profile;
pub use crate::error::{CorpusIssue, ProfileError};
pub use crate::normalize::{collapse_whitespace, normalize_text};
pub use crate::types::{validate_corpus, Profile};
