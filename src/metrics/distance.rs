//! Shared-wall and inter-object distance metrics.

use hashbrown::HashSet;

use super::{float_attr, mean_or_zero, require};
use crate::geometry;
use crate::graph::{get_or_build, AdjacencyGraph, EdgeCache};
use crate::index::SpatialIndex;
use crate::model::{ObjectId, ObjectTable, ResultSeries};
use crate::{Error, Result};

// ============================================================================
// Shared walls
// ============================================================================

/// Fraction of each object's perimeter shared with adjacent objects.
///
/// Candidates come from bounding-box overlap alone; non-touching candidates
/// simply contribute zero shared length. Perimeters are read from
/// `perimeter_column` when given, otherwise measured from the geometry.
/// Objects without candidates get 0.
pub fn shared_walls_ratio(
    objects: &ObjectTable,
    perimeter_column: Option<&str>,
) -> Result<ResultSeries> {
    tracing::info!(rows = objects.len(), "computing shared walls ratio");
    let index = SpatialIndex::build(objects)?;
    let mut series = ResultSeries::with_capacity(objects.len());
    for (row, obj) in objects.rows().iter().enumerate() {
        let neighbors = index.bbox_neighbors(objects, row)?;
        if neighbors.is_empty() {
            series.push(0.0);
            continue;
        }
        let shared: f64 = neighbors
            .into_iter()
            .map(|neighbor_row| {
                geometry::shared_boundary_length(&obj.geometry, &objects.row(neighbor_row).geometry)
            })
            .sum();
        let perimeter = match perimeter_column {
            Some(column) => float_attr(obj, column)?,
            None => geometry::perimeter(obj.id, &obj.geometry)?,
        };
        series.push(shared / perimeter);
    }
    Ok(series)
}

// ============================================================================
// Neighbour distance
// ============================================================================

/// Mean distance from each object to the objects in its adjacent
/// tessellation cells.
///
/// Every object must have a cell; a neighbouring cell without a matching
/// object is skipped, and an object whose neighbours all lack objects
/// gets 0.
pub fn neighbour_distance(
    objects: &ObjectTable,
    tessellation: &ObjectTable,
    graph: Option<&AdjacencyGraph>,
) -> Result<ResultSeries> {
    tracing::info!(objects = objects.len(), "computing neighbour distance");
    let contiguity = get_or_build(tessellation, 1, graph)?;
    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        require(tessellation, obj.id, "tessellation")?;
        let mut distances = Vec::new();
        for &neighbor_id in contiguity.neighbors(obj.id) {
            let Some(neighbor) = objects.by_id(neighbor_id) else {
                continue;
            };
            distances.push(geometry::distance(
                obj.id,
                &obj.geometry,
                &neighbor.geometry,
            )?);
        }
        series.push(mean_or_zero(&distances));
    }
    Ok(series)
}

// ============================================================================
// Mean interbuilding distance
// ============================================================================

/// Mean distance between all adjacent object pairs within each object's
/// order-k neighbourhood.
///
/// Pair distances follow the order-1 tessellation graph and are computed
/// once per pair in a shared cache; the neighbourhood is the order-k
/// closure plus the focal object itself. A neighbourhood containing no
/// adjacent pair yields NaN. Every id in the order-1 graph must have a
/// matching object.
pub fn mean_interbuilding_distance(
    objects: &ObjectTable,
    tessellation: &ObjectTable,
    graph: Option<&AdjacencyGraph>,
    graph_higher: Option<&AdjacencyGraph>,
    order: usize,
) -> Result<ResultSeries> {
    tracing::info!(
        objects = objects.len(),
        order,
        "computing mean interbuilding distance"
    );
    let order1 = get_or_build(tessellation, 1, graph)?;
    let order_k = get_or_build(tessellation, order, graph_higher)?;

    let cache = EdgeCache::build(&*order1, |a, b| {
        let first = require(objects, a, "objects")?;
        let second = require(objects, b, "objects")?;
        geometry::distance(a, &first.geometry, &second.geometry)
    })?;

    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        require(tessellation, obj.id, "tessellation")?;
        let mut hood: HashSet<ObjectId> = order_k.neighbors(obj.id).iter().copied().collect();
        hood.insert(obj.id);

        let mut sum = 0.0;
        let mut count = 0usize;
        for &member in &hood {
            for &neighbor in order1.neighbors(member) {
                // Each unordered pair once, both endpoints inside the hood.
                if member < neighbor && hood.contains(&neighbor) {
                    let value =
                        cache
                            .lookup(member, neighbor)
                            .ok_or_else(|| Error::GraphMismatch {
                                reason: format!(
                                    "pair ({member}, {neighbor}) missing from edge cache"
                                ),
                            })?;
                    sum += value;
                    count += 1;
                }
            }
        }
        series.push(if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        });
    }
    Ok(series)
}

// ============================================================================
// Tests
// ============================================================================
