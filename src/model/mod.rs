//! # Tabular Data Model
//!
//! Clean DTOs shared by every component: objects, tables, result series.
//! These types cross all boundaries: geometry ↔ graph ↔ metrics ↔ user.
//!
//! Design rule: this module is pure data — no geometry algorithms, no graph
//! construction, no I/O.

pub mod object;
pub mod series;
pub mod table;

pub use object::{AttrMap, AttrValue, ObjectId, SpatialObject};
pub use series::ResultSeries;
pub use table::ObjectTable;
