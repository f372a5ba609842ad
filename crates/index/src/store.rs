//! Vector store abstraction.
//!
//! The index treats nearest-neighbor search as a pluggable backend behind
//! [`VectorStore`]: upsert vectors under stable ids, then query for the k
//! most cosine-similar ids passing a predicate. [`BruteForceStore`] is the
//! default: an exact scan is both deterministic and entirely adequate for
//! corpora up to tens of thousands of entries. An HNSW-backed store lives in
//! [`crate::ann`] behind the same trait.

use std::cmp::Ordering;

/// Chunk size for auto-vectorized similarity loops.
const SIMD_CHUNK_SIZE: usize = 32;

/// Nearest-neighbor backend over (id, vector) entries.
///
/// `query` returns raw cosine similarity in [-1, 1]; score normalization to
/// [0, 1] happens exactly once, in [`CorpusIndex::search`](crate::CorpusIndex::search).
/// Results are ordered by similarity descending, ties broken by id
/// ascending, and truncated to `k`. A store never pads: fewer than `k`
/// predicate-passing entries yield fewer than `k` results.
pub trait VectorStore: Send + Sync {
    /// Insert or replace the vector stored under `id`.
    fn upsert(&mut self, id: String, vector: Vec<f32>);

    /// Called once after the last upsert of a build. Backends that need a
    /// construction pass (graph builds) do it here.
    fn seal(&mut self) {}

    /// Top-`k` entries most similar to `vector`, restricted to ids passing
    /// `predicate`.
    fn query(
        &self,
        vector: &[f32],
        k: usize,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<(String, f32)>;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity between two equal-length f32 vectors, chunked for
/// better cache locality and auto-vectorization. Zero-norm input yields 0.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0f32;
    let mut norm_a = 0f32;
    let mut norm_b = 0f32;

    for (chunk_a, chunk_b) in a.chunks(SIMD_CHUNK_SIZE).zip(b.chunks(SIMD_CHUNK_SIZE)) {
        for (&x, &y) in chunk_a.iter().zip(chunk_b.iter()) {
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
    }

    let norm = norm_a.sqrt() * norm_b.sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    (dot / norm).clamp(-1.0, 1.0)
}

/// Orders (id, score) pairs by score descending, id ascending on ties, and
/// truncates to `k`. Shared by every store so ordering semantics cannot
/// drift between backends.
pub(crate) fn sort_and_truncate(mut results: Vec<(String, f32)>, k: usize) -> Vec<(String, f32)> {
    results.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    results.truncate(k);
    results
}

/// Exact linear-scan store. The default backend: deterministic, no build
/// step, no recall loss.
#[derive(Default)]
pub struct BruteForceStore {
    entries: Vec<(String, Vec<f32>)>,
    by_id: hashbrown::HashMap<String, usize>,
}

impl BruteForceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorStore for BruteForceStore {
    fn upsert(&mut self, id: String, vector: Vec<f32>) {
        match self.by_id.get(&id) {
            Some(&slot) => self.entries[slot].1 = vector,
            None => {
                self.by_id.insert(id.clone(), self.entries.len());
                self.entries.push((id, vector));
            }
        }
    }

    fn query(
        &self,
        vector: &[f32],
        k: usize,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<(String, f32)> {
        if k == 0 {
            return Vec::new();
        }

        let results: Vec<(String, f32)> = self
            .entries
            .iter()
            .filter(|(id, _)| predicate(id))
            .map(|(id, stored)| (id.clone(), cosine_similarity(vector, stored)))
            .collect();

        sort_and_truncate(results, k)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> BruteForceStore {
        let mut store = BruteForceStore::new();
        store.upsert("doc-a".into(), vec![1.0, 0.0, 0.0]);
        store.upsert("doc-b".into(), vec![0.0, 1.0, 0.0]);
        store.upsert("doc-c".into(), vec![0.7, 0.7, 0.0]);
        store
    }

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![0.3, -0.2, 0.9];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_mismatched_or_empty_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_chunked_matches_reference_on_long_vectors() {
        let a: Vec<f32> = (0..100).map(|i| (i as f32 * 0.37).sin()).collect();
        let b: Vec<f32> = (0..100).map(|i| (i as f32 * 0.11).cos()).collect();

        let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        let expected = dot / (norm_a * norm_b);

        assert!((cosine_similarity(&a, &b) - expected).abs() < 1e-5);
    }

    #[test]
    fn query_orders_by_similarity() {
        let store = seeded();
        let hits = store.query(&[1.0, 0.0, 0.0], 3, &|_| true);
        let ids: Vec<&str> = hits.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["doc-a", "doc-c", "doc-b"]);
    }

    #[test]
    fn query_ties_break_by_id() {
        let mut store = BruteForceStore::new();
        store.upsert("doc-b".into(), vec![2.0, 0.0]);
        store.upsert("doc-a".into(), vec![5.0, 0.0]); // same direction, same cosine
        let hits = store.query(&[1.0, 0.0], 2, &|_| true);
        assert_eq!(hits[0].0, "doc-a");
        assert_eq!(hits[1].0, "doc-b");
    }

    #[test]
    fn query_respects_predicate() {
        let store = seeded();
        let hits = store.query(&[1.0, 0.0, 0.0], 3, &|id| id != "doc-a");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(id, _)| id != "doc-a"));
    }

    #[test]
    fn query_never_pads() {
        let store = seeded();
        let hits = store.query(&[1.0, 0.0, 0.0], 10, &|id| id == "doc-b");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn zero_k_short_circuits() {
        let store = seeded();
        assert!(store.query(&[1.0, 0.0, 0.0], 0, &|_| true).is_empty());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = seeded();
        store.upsert("doc-a".into(), vec![0.0, 0.0, 1.0]);
        assert_eq!(store.len(), 3);
        let hits = store.query(&[0.0, 0.0, 1.0], 1, &|_| true);
        assert_eq!(hits[0].0, "doc-a");
    }
}
