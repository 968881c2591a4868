//! # Spatial Index
//!
//! Packed R-tree over per-row bounding boxes, answering "which rows could
//! touch this one". Queries are two-phase: a cheap bounding-box search over
//! the tree, then (where a metric needs true touching rather than bbox
//! overlap) an exact intersection test on the candidates.
//!
//! The focal row is always excluded from its own neighbour set, and an empty
//! result is a valid "no neighbours" answer, never an error.

use geo::Intersects;
use geo_index::rtree::sort::HilbertSort;
use geo_index::rtree::{RTree, RTreeBuilder, RTreeIndex};

use crate::geometry;
use crate::model::ObjectTable;
use crate::Result;

/// R-tree over the bounding boxes of one table's rows.
pub struct SpatialIndex {
    tree: RTree<f64>,
    /// Tree data index → table row.
    data_to_row: Vec<usize>,
}

impl SpatialIndex {
    /// Index every row of a table. Fails on geometry without a bounding box.
    pub fn build(table: &ObjectTable) -> Result<Self> {
        let mut builder = RTreeBuilder::<f64>::new(table.len() as u32);
        let mut data_to_row = vec![0usize; table.len()];
        for (row, obj) in table.rows().iter().enumerate() {
            let rect = geometry::bounding_box(obj.id, &obj.geometry)?;
            let data_idx = builder.add(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
            data_to_row[data_idx as usize] = row;
        }
        let tree = builder.finish::<HilbertSort>();
        tracing::debug!(rows = table.len(), "spatial index built");
        Ok(Self { tree, data_to_row })
    }

    /// Rows whose bounding box overlaps the focal row's, excluding the focal
    /// row itself. Sorted for deterministic iteration.
    pub fn bbox_neighbors(&self, table: &ObjectTable, row: usize) -> Result<Vec<usize>> {
        if self.data_to_row.is_empty() {
            return Ok(Vec::new());
        }
        let obj = table.row(row);
        let rect = geometry::bounding_box(obj.id, &obj.geometry)?;
        let mut hits = self
            .tree
            .search(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
        hits.sort_unstable();
        hits.dedup();

        let mut rows: Vec<usize> = hits
            .into_iter()
            .map(|data_idx| self.data_to_row[data_idx as usize])
            .filter(|&candidate| candidate != row)
            .collect();
        rows.sort_unstable();
        Ok(rows)
    }

    /// Bounding-box candidates refined by an exact intersection test.
    pub fn intersecting_neighbors(&self, table: &ObjectTable, row: usize) -> Result<Vec<usize>> {
        let focal = &table.row(row).geometry;
        let rows = self
            .bbox_neighbors(table, row)?
            .into_iter()
            .filter(|&candidate| focal.intersects(&table.row(candidate).geometry))
            .collect();
        Ok(rows)
    }
}

// ============================================================================
// Tests
// ============================================================================
