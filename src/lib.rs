//! # morpho-rs — Spatial Distribution Characters
//!
//! Batch analysis of how objects in an urban fabric are distributed:
//! orientation, alignment, inter-object distance and adjacency, computed
//! per object over tables of polygons and lines.
//!
//! ## Design Principles
//!
//! 1. **Tables in, series out**: every metric maps an [`ObjectTable`] to a
//!    positionally aligned [`ResultSeries`]
//! 2. **Graphs are reusable**: contiguity is built once and passed to many
//!    metrics; a supplied graph is validated, never trusted
//! 3. **Joins are strict**: id lookups either resolve or fail with the
//!    offending id, they never silently misalign
//! 4. **Planar only**: all lengths and angles are Euclidean, in the CRS
//!    units of the input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use morpho_rs::{queen_contiguity, ObjectTable};
//!
//! # fn example(buildings: ObjectTable, tessellation: ObjectTable) -> morpho_rs::Result<()> {
//! let orient = morpho_rs::orientation(&buildings)?;
//! let mut buildings = buildings;
//! buildings.set_column("orientation", &orient)?;
//!
//! let cells = queen_contiguity(&tessellation)?;
//! let align = morpho_rs::alignment(&buildings, "orientation", &tessellation, Some(&cells))?;
//! let dist = morpho_rs::neighbour_distance(&buildings, &tessellation, Some(&cells))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//!
//! | Metric | Inputs | Output per object |
//! |--------|--------|-------------------|
//! | [`orientation`] | objects | deviation from cardinal, [0, 45] |
//! | [`shared_walls_ratio`] | objects | shared perimeter fraction |
//! | [`street_alignment`] | objects + streets | orientation deviation |
//! | [`cell_alignment`] | objects + tessellation | orientation deviation |
//! | [`alignment`] | objects + tessellation | mean neighbour deviation |
//! | [`neighbour_distance`] | objects + tessellation | mean distance |
//! | [`mean_interbuilding_distance`] | objects + tessellation | mean pair distance, order k |
//! | [`neighbouring_street_orientation_deviation`] | streets | mean deviation |
//! | [`building_adjacency`] | objects + tessellation | objects per structure |

// ============================================================================
// Modules
// ============================================================================

pub mod geometry;
pub mod graph;
pub mod index;
pub mod metrics;
pub mod model;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{AttrMap, AttrValue, ObjectId, ObjectTable, ResultSeries, SpatialObject};

// ============================================================================
// Re-exports: Graphs
// ============================================================================

pub use graph::{
    compute_patches, higher_order, queen_contiguity, AdjacencyGraph, EdgeCache, PatchAssignment,
};

// ============================================================================
// Re-exports: Metrics
// ============================================================================

pub use metrics::{
    alignment, building_adjacency, cell_alignment, mean_interbuilding_distance,
    neighbour_distance, neighbouring_street_orientation_deviation, orientation,
    shared_walls_ratio, street_alignment, DEFAULT_NEIGHBORHOOD_ORDER,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid geometry for object {id}: {reason}")]
    InvalidGeometry { id: ObjectId, reason: String },

    #[error("Object {id} has no matching row in the {table} table")]
    MissingJoinKey { id: ObjectId, table: String },

    #[error("Object {id} is missing a numeric value in column {column}")]
    MissingColumn { id: ObjectId, column: String },

    #[error("Duplicate id {id}")]
    DuplicateId { id: ObjectId },

    #[error("Column {column} has {got} values for {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("Graph does not match the table: {reason}")]
    GraphMismatch { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
