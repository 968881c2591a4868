//! Building adjacency: joined-structure ratio within a neighbourhood.

use hashbrown::HashSet;

use super::require;
use crate::graph::{compute_patches, get_or_build, AdjacencyGraph};
use crate::model::{ObjectTable, ResultSeries};
use crate::Result;

/// Ratio of objects to joined built-up structures within each object's
/// order-k neighbourhood.
///
/// Structures are patches: connected components of the order-1 graph built
/// from the objects themselves. The neighbourhood comes from the order-k
/// tessellation graph, plus the focal object. Neighbourhood cells without a
/// matching object are skipped; the focal object always counts, so the
/// ratio is at least 1 (a lone detached object scores exactly 1).
pub fn building_adjacency(
    objects: &ObjectTable,
    tessellation: &ObjectTable,
    graph: Option<&AdjacencyGraph>,
    graph_higher: Option<&AdjacencyGraph>,
    order: usize,
) -> Result<ResultSeries> {
    tracing::info!(
        objects = objects.len(),
        order,
        "computing building adjacency"
    );
    let touching = get_or_build(objects, 1, graph)?;
    let order_k = get_or_build(tessellation, order, graph_higher)?;
    let patches = compute_patches(objects, &touching);

    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        require(tessellation, obj.id, "tessellation")?;
        let mut object_count = 0usize;
        let mut patch_ids: HashSet<u32> = HashSet::new();
        let hood = order_k
            .neighbors(obj.id)
            .iter()
            .copied()
            .chain(std::iter::once(obj.id));
        for member in hood {
            let Some(patch) = patches.patch_of(member) else {
                continue;
            };
            object_count += 1;
            patch_ids.insert(patch);
        }
        series.push(object_count as f64 / patch_ids.len() as f64);
    }
    Ok(series)
}

// ============================================================================
// Tests
// ============================================================================
