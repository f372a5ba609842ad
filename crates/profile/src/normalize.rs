//! Shared text normalization.
//!
//! Profile summaries and patient queries must be normalized identically or
//! their embeddings live in different spaces and cosine distances stop being
//! comparable. This module is that single normalizer: NFKC, lowercase,
//! whitespace collapsed to single ASCII spaces.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces. Returns an empty string for whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Normalizes text for embedding: Unicode NFKC, lowercase, whitespace
/// collapsed. Deterministic and locale-independent.
///
/// Lowercasing walks grapheme clusters so multi-char expansions (German ß
/// becomes ss) and complex scripts stay intact.
pub fn normalize_text(text: &str) -> String {
    let nfkc: String = text.nfkc().collect();

    let mut lowered = String::with_capacity(nfkc.len());
    for grapheme in nfkc.graphemes(true) {
        for ch in grapheme.chars() {
            for lower in ch.to_lowercase() {
                lowered.push(lower);
            }
        }
    }

    collapse_whitespace(&lowered)
}
