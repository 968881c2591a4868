//! # Distribution Metrics
//!
//! The public aggregate operations. Each consumes one or more tables plus
//! optional precomputed contiguity graphs and returns one numeric value per
//! input row, aligned positionally to the object table.
//!
//! The intended reuse pattern: build the adjacency graphs once, then pass
//! them into several metrics — every operation accepts `None` and falls back
//! to constructing its own.
//!
//! | Operation | Neighbourhood | Empty-neighbourhood default |
//! |-----------|---------------|-----------------------------|
//! | `orientation` | — | (fails on degenerate geometry) |
//! | `shared_walls_ratio` | bbox overlap | 0 |
//! | `street_alignment` | joined street segment | 0 on null street id |
//! | `cell_alignment` | joined tessellation cell | (join is required) |
//! | `alignment` | order-1 cells | 0 |
//! | `neighbour_distance` | order-1 cells | 0 |
//! | `mean_interbuilding_distance` | order-k cells | NaN |
//! | `neighbouring_street_orientation_deviation` | touching segments | 0 |
//! | `building_adjacency` | order-k cells | — |

pub mod adjacency;
pub mod alignment;
pub mod distance;

pub use adjacency::building_adjacency;
pub use alignment::{
    alignment, cell_alignment, neighbouring_street_orientation_deviation, orientation,
    street_alignment,
};
pub use distance::{mean_interbuilding_distance, neighbour_distance, shared_walls_ratio};

use crate::model::{AttrValue, ObjectId, ObjectTable, SpatialObject};
use crate::{Error, Result};

/// Default topological radius of the analysis neighbourhood for the
/// order-k metrics.
pub const DEFAULT_NEIGHBORHOOD_ORDER: usize = 3;

/// Numeric attribute of a row, or `MissingColumn` naming the offender.
pub(crate) fn float_attr(obj: &SpatialObject, column: &str) -> Result<f64> {
    obj.get(column)
        .and_then(AttrValue::as_float)
        .ok_or_else(|| Error::MissingColumn {
            id: obj.id,
            column: column.to_string(),
        })
}

/// Row of a companion table by id, or `MissingJoinKey`.
pub(crate) fn require<'t>(
    table: &'t ObjectTable,
    id: ObjectId,
    table_name: &str,
) -> Result<&'t SpatialObject> {
    table.by_id(id).ok_or_else(|| Error::MissingJoinKey {
        id,
        table: table_name.to_string(),
    })
}

/// Arithmetic mean with the metric-wide empty default of 0.
pub(crate) fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
