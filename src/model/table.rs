//! Object table — the ordered collection every metric consumes.

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::{AttrValue, ObjectId, ResultSeries, SpatialObject};
use crate::{Error, Result};

/// An ordered table of spatial objects with an id-to-row map.
///
/// Identity is the user-chosen unique id, not positional index: objects are
/// cross-referenced between the object, tessellation and street tables, and
/// those tables need not share row order. Metric outputs, on the other hand,
/// are always aligned to row position.
///
/// Id uniqueness is enforced at construction — duplicate ids would otherwise
/// produce silently wrong joins downstream.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectTable {
    rows: Vec<SpatialObject>,
    #[serde(skip)]
    id_to_row: HashMap<ObjectId, usize>,
}

impl ObjectTable {
    /// Build a table from rows, rejecting duplicate identifiers.
    pub fn from_rows(rows: Vec<SpatialObject>) -> Result<Self> {
        let mut id_to_row = HashMap::with_capacity(rows.len());
        for (row, obj) in rows.iter().enumerate() {
            if id_to_row.insert(obj.id, row).is_some() {
                return Err(Error::DuplicateId { id: obj.id });
            }
        }
        Ok(Self { rows, id_to_row })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SpatialObject] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> &SpatialObject {
        &self.rows[row]
    }

    /// Row position of an id, if present.
    pub fn row_of(&self, id: ObjectId) -> Option<usize> {
        self.id_to_row.get(&id).copied()
    }

    pub fn by_id(&self, id: ObjectId) -> Option<&SpatialObject> {
        self.row_of(id).map(|row| &self.rows[row])
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.id_to_row.contains_key(&id)
    }

    /// Ids in row order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.rows.iter().map(|obj| obj.id)
    }

    /// Attach a positionally aligned column of floats, e.g. the output of
    /// an upstream metric.
    pub fn set_column(&mut self, column: &str, values: &ResultSeries) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::ColumnLength {
                column: column.to_string(),
                expected: self.rows.len(),
                got: values.len(),
            });
        }
        for (obj, value) in self.rows.iter_mut().zip(values.iter()) {
            obj.attributes.insert(column.to_string(), AttrValue::Float(value));
        }
        Ok(())
    }

    /// Remove a column from every row.
    pub fn drop_column(&mut self, column: &str) {
        for obj in &mut self.rows {
            obj.attributes.remove(column);
        }
    }
}

/// Deserializes through [`ObjectTable::from_rows`], rebuilding the id map
/// and keeping the duplicate-id rejection.
impl<'de> Deserialize<'de> for ObjectTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            rows: Vec<SpatialObject>,
        }
        let raw = Raw::deserialize(deserializer)?;
        ObjectTable::from_rows(raw.rows).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
