//! Deterministic ranking of search hits.
//!
//! The index already scored and filtered the candidates; the ranker's job is
//! the part callers have to be able to trust and reproduce: a total order
//! with an explicit tie-break, clamped scores, and gapless 1-based ranks.
//! It deliberately does NOT re-weight similarity by any metadata field: a
//! profile's experience only matters when two scores are indistinguishable,
//! so ranking behavior stays predictable and explainable.

use std::cmp::Ordering;

use index::{ProfileFilter, SearchHit};

use crate::types::ScoredMatch;

/// Scores closer than this are considered tied and fall through to the
/// experience/id tie-break.
pub const SCORE_EPSILON: f32 = 1e-6;

/// Orders hits into the final result list.
///
/// Sort key: similarity descending; within epsilon-ties, years of experience
/// descending, then identifier ascending. The identifier leg makes the order
/// total, so repeated calls and different platforms agree. Ranks are
/// assigned 1..=M afterwards, one per entry, ties included.
pub fn rank(hits: Vec<SearchHit>, filter: &ProfileFilter) -> Vec<ScoredMatch> {
    let satisfied = filter.satisfied_fields();

    let mut matches: Vec<ScoredMatch> = hits
        .into_iter()
        .map(|hit| ScoredMatch {
            score: hit.similarity.clamp(0.0, 1.0),
            entry: hit.entry,
            rank: 0,
            satisfied: satisfied.clone(),
        })
        .collect();

    matches.sort_by(compare);

    for (position, entry) in matches.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    matches
}

fn compare(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    if (a.score - b.score).abs() < SCORE_EPSILON {
        b.entry
            .profile
            .years_experience
            .cmp(&a.entry.profile.years_experience)
            .then_with(|| a.entry.profile.id.cmp(&b.entry.profile.id))
    } else {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    }
}
