//! Orientation and orientation-deviation metrics.

use hashbrown::HashMap;

use super::{float_attr, mean_or_zero, require};
use crate::geometry;
use crate::graph::{get_or_build, AdjacencyGraph};
use crate::index::SpatialIndex;
use crate::model::{AttrValue, ObjectId, ObjectTable, ResultSeries};
use crate::{Error, Result};

// ============================================================================
// Orientation
// ============================================================================

/// Deviation of each object's cardinal orientation from the closest
/// multiple of 90 degrees, folded into [0, 45].
///
/// Polygons orient along the long axis of their minimum rotated rectangle;
/// linestrings along the chord from first to last vertex.
pub fn orientation(objects: &ObjectTable) -> Result<ResultSeries> {
    tracing::info!(rows = objects.len(), "computing orientation");
    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        series.push(geometry::orientation_of(obj.id, &obj.geometry)?);
    }
    Ok(series)
}

// ============================================================================
// Street alignment
// ============================================================================

/// Absolute difference between each object's orientation and the
/// orientation of its street segment.
///
/// Objects are joined to streets through a network-id attribute: each
/// object names a street by id, and each street carries that id in
/// `network_id_column`. An object with a null or absent network id gets 0.
/// An object naming a street no row carries fails with `MissingJoinKey`.
pub fn street_alignment(
    objects: &ObjectTable,
    streets: &ObjectTable,
    orientation_column: &str,
    network_id_column: &str,
) -> Result<ResultSeries> {
    tracing::info!(
        objects = objects.len(),
        streets = streets.len(),
        "computing street alignment"
    );
    // Street lookup keyed by network id, with memoized segment orientations.
    let mut street_rows: HashMap<ObjectId, usize> = HashMap::with_capacity(streets.len());
    for (row, street) in streets.rows().iter().enumerate() {
        match street.get(network_id_column) {
            Some(&AttrValue::Id(network_id)) => {
                if street_rows.insert(network_id, row).is_some() {
                    return Err(Error::DuplicateId { id: network_id });
                }
            }
            Some(AttrValue::Null) | None => {}
            Some(_) => {
                return Err(Error::MissingColumn {
                    id: street.id,
                    column: network_id_column.to_string(),
                });
            }
        }
    }

    let mut street_orientations: HashMap<ObjectId, f64> = HashMap::new();
    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        let network_id = match obj.get(network_id_column) {
            Some(&AttrValue::Id(network_id)) => network_id,
            Some(AttrValue::Null) | None => {
                series.push(0.0);
                continue;
            }
            Some(_) => {
                return Err(Error::MissingColumn {
                    id: obj.id,
                    column: network_id_column.to_string(),
                });
            }
        };
        let &street_row = street_rows
            .get(&network_id)
            .ok_or_else(|| Error::MissingJoinKey {
                id: network_id,
                table: "streets".to_string(),
            })?;
        let street_orientation = match street_orientations.get(&network_id) {
            Some(&value) => value,
            None => {
                let street = streets.row(street_row);
                let value = geometry::orientation_of(street.id, &street.geometry)?;
                street_orientations.insert(network_id, value);
                value
            }
        };
        let own = float_attr(obj, orientation_column)?;
        series.push((own - street_orientation).abs());
    }
    Ok(series)
}

// ============================================================================
// Cell alignment
// ============================================================================

/// Absolute difference between each object's orientation and the
/// orientation of its tessellation cell.
///
/// Cells join by shared id; a missing cell fails with `MissingJoinKey`.
pub fn cell_alignment(
    objects: &ObjectTable,
    tessellation: &ObjectTable,
    orientation_column: &str,
    cell_orientation_column: &str,
) -> Result<ResultSeries> {
    tracing::info!(objects = objects.len(), "computing cell alignment");
    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        let own = float_attr(obj, orientation_column)?;
        let cell = require(tessellation, obj.id, "tessellation")?;
        let cell_orientation = float_attr(cell, cell_orientation_column)?;
        series.push((own - cell_orientation).abs());
    }
    Ok(series)
}

// ============================================================================
// Neighbour alignment
// ============================================================================

/// Mean absolute orientation difference between each object and its
/// order-1 neighbours, where the neighbourhood comes from the tessellation
/// graph rather than the objects themselves.
///
/// Every object must have a cell; an object with no neighbouring cells
/// gets 0. A neighbouring cell whose id matches no object fails with
/// `MissingJoinKey`.
pub fn alignment(
    objects: &ObjectTable,
    orientation_column: &str,
    tessellation: &ObjectTable,
    graph: Option<&AdjacencyGraph>,
) -> Result<ResultSeries> {
    tracing::info!(objects = objects.len(), "computing alignment");
    let contiguity = get_or_build(tessellation, 1, graph)?;
    let mut series = ResultSeries::with_capacity(objects.len());
    for obj in objects.rows() {
        let own = float_attr(obj, orientation_column)?;
        require(tessellation, obj.id, "tessellation")?;
        let mut deviations = Vec::new();
        for &neighbor_id in contiguity.neighbors(obj.id) {
            let neighbor = require(objects, neighbor_id, "objects")?;
            deviations.push((own - float_attr(neighbor, orientation_column)?).abs());
        }
        series.push(mean_or_zero(&deviations));
    }
    Ok(series)
}

// ============================================================================
// Street orientation deviation
// ============================================================================

/// Mean absolute orientation difference between each street segment and
/// the segments it touches. Isolated segments get 0.
pub fn neighbouring_street_orientation_deviation(streets: &ObjectTable) -> Result<ResultSeries> {
    tracing::info!(streets = streets.len(), "computing street orientation deviation");
    let mut orientations = Vec::with_capacity(streets.len());
    for street in streets.rows() {
        orientations.push(geometry::orientation_of(street.id, &street.geometry)?);
    }

    let index = SpatialIndex::build(streets)?;
    let mut series = ResultSeries::with_capacity(streets.len());
    for row in 0..streets.len() {
        let own = orientations[row];
        let deviations: Vec<f64> = index
            .intersecting_neighbors(streets, row)?
            .into_iter()
            .map(|neighbor_row| (own - orientations[neighbor_row]).abs())
            .collect();
        series.push(mean_or_zero(&deviations));
    }
    Ok(series)
}

// ============================================================================
// Tests
// ============================================================================
