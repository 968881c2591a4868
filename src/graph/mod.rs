//! # Contiguity Graphs
//!
//! Adjacency relations between objects at one or more topological orders:
//! order 1 is direct touching (queen contiguity), order k is everything
//! reachable within k touching-hops.
//!
//! Graphs are symmetric by construction but stored as directed adjacency
//! lists; a derived edge enumeration yields both directions of every edge.
//! Callers reuse one graph across several metrics by passing it in — the
//! accessor validates a supplied graph against the table and fails fast
//! rather than producing silently wrong joins.

pub mod edge_cache;
pub mod patches;

use std::borrow::Cow;
use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::index::SpatialIndex;
use crate::model::{ObjectId, ObjectTable};
use crate::{Error, Result};

pub use edge_cache::EdgeCache;
pub use patches::{compute_patches, PatchAssignment};

/// Per-node neighbour list. Most objects touch only a handful of others.
type NeighborList = SmallVec<[ObjectId; 8]>;

// ============================================================================
// AdjacencyGraph
// ============================================================================

/// A contiguity relation over one table's objects at a fixed topological
/// order. Neighbour lists are sorted and deduplicated; the relation is
/// symmetric (if A neighbours B then B neighbours A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    order: usize,
    /// All node ids, in the row order of the source table. Isolated objects
    /// are nodes too.
    nodes: Vec<ObjectId>,
    neighbors: HashMap<ObjectId, NeighborList>,
}

impl AdjacencyGraph {
    /// Build a graph from directed edge pairs. Edges are symmetrized, sorted
    /// and deduplicated; `nodes` fixes the deterministic iteration order and
    /// may include isolated ids.
    pub fn from_edges(
        order: usize,
        nodes: Vec<ObjectId>,
        edges: impl IntoIterator<Item = (ObjectId, ObjectId)>,
    ) -> Self {
        let mut neighbors: HashMap<ObjectId, NeighborList> =
            HashMap::with_capacity(nodes.len());
        for &node in &nodes {
            neighbors.entry(node).or_default();
        }
        for (a, b) in edges {
            if a == b {
                continue;
            }
            neighbors.entry(a).or_default().push(b);
            neighbors.entry(b).or_default().push(a);
        }
        for list in neighbors.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self {
            order,
            nodes,
            neighbors,
        }
    }

    /// Topological order this graph was built at.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in source-table row order.
    pub fn nodes(&self) -> &[ObjectId] {
        &self.nodes
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.neighbors.contains_key(&id)
    }

    /// Sorted neighbours of `id`; empty for isolated or unknown ids.
    pub fn neighbors(&self, id: ObjectId) -> &[ObjectId] {
        self.neighbors.get(&id).map(|list| list.as_slice()).unwrap_or(&[])
    }

    pub fn has_edge(&self, a: ObjectId, b: ObjectId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Directed edge enumeration: every undirected edge appears once per
    /// direction, in deterministic (node order, sorted neighbour) order.
    pub fn edges(&self) -> impl Iterator<Item = (ObjectId, ObjectId)> + '_ {
        self.nodes
            .iter()
            .flat_map(move |&focal| self.neighbors(focal).iter().map(move |&n| (focal, n)))
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Build order-1 queen contiguity from a table: two objects are neighbours
/// iff their geometries intersect (touch or overlap).
pub fn queen_contiguity(table: &ObjectTable) -> Result<AdjacencyGraph> {
    tracing::debug!(rows = table.len(), "building queen contiguity");
    let index = SpatialIndex::build(table)?;
    let nodes: Vec<ObjectId> = table.ids().collect();
    let mut edges = Vec::new();
    for (row, obj) in table.rows().iter().enumerate() {
        for neighbor_row in index.intersecting_neighbors(table, row)? {
            edges.push((obj.id, table.row(neighbor_row).id));
        }
    }
    Ok(AdjacencyGraph::from_edges(1, nodes, edges))
}

/// Expand an order-1 graph to order k: neighbours of a node are all nodes
/// reachable within k hops, excluding the node itself.
pub fn higher_order(graph: &AdjacencyGraph, k: usize) -> AdjacencyGraph {
    tracing::debug!(nodes = graph.node_count(), k, "expanding contiguity order");
    let mut edges = Vec::new();
    for &start in graph.nodes() {
        let mut visited: HashSet<ObjectId> = HashSet::new();
        visited.insert(start);
        let mut queue: VecDeque<(ObjectId, usize)> = VecDeque::new();
        queue.push_back((start, 0));
        while let Some((current, depth)) = queue.pop_front() {
            if depth == k {
                continue;
            }
            for &next in graph.neighbors(current) {
                if visited.insert(next) {
                    edges.push((start, next));
                    queue.push_back((next, depth + 1));
                }
            }
        }
    }
    AdjacencyGraph::from_edges(k, graph.nodes().to_vec(), edges)
}

// ============================================================================
// Accessor
// ============================================================================

/// Use a caller-supplied graph after validating it against `table`, or build
/// one at the requested order.
///
/// A supplied graph must have been built from the same table at the same
/// order; mismatches fail fast instead of producing wrong joins.
pub fn get_or_build<'g>(
    table: &ObjectTable,
    order: usize,
    supplied: Option<&'g AdjacencyGraph>,
) -> Result<Cow<'g, AdjacencyGraph>> {
    if order == 0 {
        return Err(Error::GraphMismatch {
            reason: "contiguity order must be at least 1".to_string(),
        });
    }
    if let Some(graph) = supplied {
        validate(table, order, graph)?;
        return Ok(Cow::Borrowed(graph));
    }
    let order1 = queen_contiguity(table)?;
    if order == 1 {
        Ok(Cow::Owned(order1))
    } else {
        Ok(Cow::Owned(higher_order(&order1, order)))
    }
}

fn validate(table: &ObjectTable, order: usize, graph: &AdjacencyGraph) -> Result<()> {
    if graph.order() != order {
        return Err(Error::GraphMismatch {
            reason: format!(
                "graph was built at order {}, metric requires order {order}",
                graph.order()
            ),
        });
    }
    if graph.node_count() != table.len() {
        return Err(Error::GraphMismatch {
            reason: format!(
                "graph has {} nodes, table has {} rows",
                graph.node_count(),
                table.len()
            ),
        });
    }
    for &node in graph.nodes() {
        if !table.contains(node) {
            return Err(Error::GraphMismatch {
                reason: format!("graph node {node} is not in the table"),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
