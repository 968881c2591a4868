//! Patch detection — connected components of the order-1 graph.
//!
//! A patch is a maximal set of objects transitively connected by direct
//! touching: a terraced row of houses is one patch, a detached house is a
//! singleton. Patch membership is what `building_adjacency` counts.

use std::collections::VecDeque;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::AdjacencyGraph;
use crate::model::{ObjectId, ObjectTable};

/// Assignment of every object to exactly one patch.
///
/// Patch ids are positive, arbitrary but unique per component; two objects
/// share a patch id iff they are connected by a path of order-1 edges.
/// Computed fresh per call, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchAssignment {
    assignment: HashMap<ObjectId, u32>,
    patch_count: u32,
}

impl PatchAssignment {
    pub fn patch_of(&self, id: ObjectId) -> Option<u32> {
        self.assignment.get(&id).copied()
    }

    /// Number of distinct patches.
    pub fn patch_count(&self) -> u32 {
        self.patch_count
    }

    /// Number of assigned objects.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, u32)> + '_ {
        self.assignment.iter().map(|(&id, &patch)| (id, patch))
    }
}

/// Partition all objects into patches by iterative flood fill over the
/// order-1 graph.
///
/// Objects are visited in table order; each unassigned object seeds a
/// worklist traversal that labels everything transitively reachable with a
/// fresh patch id. No recursion — dense clusters would otherwise overflow
/// the stack — and the assignment map doubles as the visited set, keeping
/// membership checks O(1).
pub fn compute_patches(table: &ObjectTable, graph: &AdjacencyGraph) -> PatchAssignment {
    let mut assignment: HashMap<ObjectId, u32> = HashMap::with_capacity(table.len());
    let mut next_patch = 1u32;

    for obj in table.rows() {
        if assignment.contains_key(&obj.id) {
            continue;
        }
        let mut queue = VecDeque::new();
        assignment.insert(obj.id, next_patch);
        queue.push_back(obj.id);
        while let Some(current) = queue.pop_front() {
            for &neighbor in graph.neighbors(current) {
                if !assignment.contains_key(&neighbor) {
                    assignment.insert(neighbor, next_patch);
                    queue.push_back(neighbor);
                }
            }
        }
        next_patch += 1;
    }

    tracing::debug!(
        objects = assignment.len(),
        patches = next_patch - 1,
        "patches computed"
    );
    PatchAssignment {
        assignment,
        patch_count: next_patch - 1,
    }
}

// ============================================================================
// Tests
// ============================================================================
