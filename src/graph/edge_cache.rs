//! Pairwise edge cache — symmetric values over undirected graph edges.

use hashbrown::HashMap;

use super::AdjacencyGraph;
use crate::model::ObjectId;
use crate::Result;

/// A value attached to each unordered pair of adjacent objects, computed
/// once and looked up from either direction.
///
/// Keys are normalized to (smaller id, larger id), so the symmetry invariant
/// `lookup(a, b) == lookup(b, a)` holds exactly — there is only one stored
/// entry per pair.
#[derive(Debug, Clone, Default)]
pub struct EdgeCache {
    values: HashMap<(ObjectId, ObjectId), f64>,
}

impl EdgeCache {
    /// Evaluate `value_fn` once per undirected edge of `graph`.
    ///
    /// Edges are visited in the graph's deterministic directed enumeration;
    /// the reverse direction of an already-computed pair is skipped.
    pub fn build<F>(graph: &AdjacencyGraph, mut value_fn: F) -> Result<Self>
    where
        F: FnMut(ObjectId, ObjectId) -> Result<f64>,
    {
        let mut values = HashMap::new();
        for (focal, neighbor) in graph.edges() {
            let pair = Self::key(focal, neighbor);
            if values.contains_key(&pair) {
                continue;
            }
            values.insert(pair, value_fn(focal, neighbor)?);
        }
        tracing::debug!(pairs = values.len(), "edge cache built");
        Ok(Self { values })
    }

    /// Value of the unordered pair {a, b}, if the edge exists.
    pub fn lookup(&self, a: ObjectId, b: ObjectId) -> Option<f64> {
        self.values.get(&Self::key(a, b)).copied()
    }

    /// Number of unordered pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn key(a: ObjectId, b: ObjectId) -> (ObjectId, ObjectId) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

// ============================================================================
// Tests
// ============================================================================
