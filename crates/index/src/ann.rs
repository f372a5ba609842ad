//! HNSW-backed vector store.
//!
//! Same [`VectorStore`] contract as the exact scan, traded for sub-linear
//! query time on large corpora. Filtering happens after the graph search, so
//! the store oversamples candidates; when even the oversampled fetch cannot
//! satisfy `k` predicate-passing entries it falls back to the exact scan,
//! which keeps the no-padding and filter-correctness contracts intact at the
//! cost of one slow query.
//!
//! Worth using above roughly ten thousand vectors; below that the exact
//! [`BruteForceStore`](crate::store::BruteForceStore) is simpler and
//! deterministic by construction.

use hnsw_rs::prelude::*;

use crate::store::{cosine_similarity, sort_and_truncate, VectorStore};

/// Graphs below this size are pointless; the store scans linearly instead.
const MIN_VECTORS_FOR_GRAPH: usize = 10;

/// HNSW construction and search parameters.
#[derive(Debug, Clone, Copy)]
pub struct AnnParams {
    /// Neighbors per node (higher = better recall, slower build).
    pub m: usize,
    /// Candidate-list size during construction.
    pub ef_construction: usize,
    /// Candidate-list size during search.
    pub ef_search: usize,
    /// Candidate multiplier applied before post-filtering.
    pub oversample: f32,
}

impl Default for AnnParams {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
            ef_search: 50,
            oversample: 2.0,
        }
    }
}

impl AnnParams {
    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    pub fn with_ef_construction(mut self, ef: usize) -> Self {
        self.ef_construction = ef;
        self
    }

    pub fn with_ef_search(mut self, ef: usize) -> Self {
        self.ef_search = ef;
        self
    }

    pub fn with_oversample(mut self, oversample: f32) -> Self {
        self.oversample = oversample.max(1.0);
        self
    }
}

/// Approximate nearest-neighbor store over an HNSW graph.
pub struct HnswStore {
    params: AnnParams,
    ids: Vec<String>,
    vectors: Vec<Vec<f32>>,
    by_id: hashbrown::HashMap<String, usize>,
    graph: Option<Hnsw<'static, f32, DistCosine>>,
}

impl HnswStore {
    pub fn new(params: AnnParams) -> Self {
        Self {
            params,
            ids: Vec::new(),
            vectors: Vec::new(),
            by_id: hashbrown::HashMap::new(),
            graph: None,
        }
    }

    fn graph_query(
        &self,
        graph: &Hnsw<'static, f32, DistCosine>,
        vector: &[f32],
        k: usize,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<(String, f32)> {
        let oversampled = ((k as f32 * self.params.oversample).ceil() as usize)
            .max(k)
            .min(self.vectors.len());
        let neighbours: Vec<Neighbour> =
            graph.search(vector, oversampled, self.params.ef_search);

        let mut results = Vec::with_capacity(neighbours.len());
        for neighbour in neighbours {
            let slot = neighbour.get_origin_id();
            let Some(id) = self.ids.get(slot) else {
                continue;
            };
            if !predicate(id) {
                continue;
            }
            // DistCosine yields 1 - cos; undo it to get raw cosine.
            let cosine = (1.0 - neighbour.distance).clamp(-1.0, 1.0);
            results.push((id.clone(), cosine));
        }
        results
    }

    fn linear_query(
        &self,
        vector: &[f32],
        k: usize,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<(String, f32)> {
        let results: Vec<(String, f32)> = self
            .ids
            .iter()
            .zip(&self.vectors)
            .filter(|(id, _)| predicate(id))
            .map(|(id, stored)| (id.clone(), cosine_similarity(vector, stored)))
            .collect();
        sort_and_truncate(results, k)
    }
}

impl VectorStore for HnswStore {
    fn upsert(&mut self, id: String, vector: Vec<f32>) {
        match self.by_id.get(&id) {
            Some(&slot) => self.vectors[slot] = vector,
            None => {
                self.by_id.insert(id.clone(), self.ids.len());
                self.ids.push(id);
                self.vectors.push(vector);
            }
        }
        // Any mutation invalidates the graph until the next seal.
        self.graph = None;
    }

    fn seal(&mut self) {
        let nb_elem = self.vectors.len();
        if nb_elem < MIN_VECTORS_FOR_GRAPH {
            return;
        }

        let nb_layer = 16.min((nb_elem as f32).ln().trunc() as usize);
        let graph = Hnsw::<f32, DistCosine>::new(
            self.params.m,
            nb_elem,
            nb_layer,
            self.params.ef_construction,
            DistCosine {},
        );

        let data_for_insertion: Vec<(&Vec<f32>, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(slot, vector)| (vector, slot))
            .collect();
        graph.parallel_insert(&data_for_insertion);

        tracing::debug!(vectors = nb_elem, layers = nb_layer, "sealed hnsw graph");
        self.graph = Some(graph);
    }

    fn query(
        &self,
        vector: &[f32],
        k: usize,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Vec<(String, f32)> {
        if k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        if let Some(graph) = &self.graph {
            let results = self.graph_query(graph, vector, k, predicate);
            // The filter may have eaten most of the oversampled candidates.
            // Fall back to the exact scan rather than under-report matches.
            if results.len() >= k || results.len() == self.vectors.len() {
                return sort_and_truncate(results, k);
            }
            tracing::debug!(
                found = results.len(),
                wanted = k,
                "oversampled graph search underfilled; falling back to exact scan"
            );
        }

        self.linear_query(vector, k, predicate)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
