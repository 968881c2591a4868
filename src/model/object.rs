//! Spatial object in a table.

use geo::Geometry;
use serde::{Deserialize, Serialize};

/// Opaque object identifier.
///
/// Identifiers are user-chosen and stable across tables: the same id names a
/// building in the object table and its cell in the tessellation table. Row
/// positions never cross a table boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scalar attribute attached to an object by the caller or an upstream
/// metric (orientation value, perimeter, network-segment id).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Float(f64),
    Id(ObjectId),
    Null,
}

impl AttrValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<ObjectId> {
        match self {
            AttrValue::Id(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<ObjectId> for AttrValue {
    fn from(id: ObjectId) -> Self {
        AttrValue::Id(id)
    }
}

/// A map of attribute column names to values.
pub type AttrMap = hashbrown::HashMap<String, AttrValue>;

/// A single geometric record being analysed: a building footprint, a street
/// segment, or a tessellation cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialObject {
    pub id: ObjectId,
    /// Polygon or LineString; other geometry kinds are rejected by the
    /// operations that need an orientation or a boundary.
    pub geometry: Geometry<f64>,
    pub attributes: AttrMap,
}

impl SpatialObject {
    pub fn new(id: ObjectId, geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            id,
            geometry: geometry.into(),
            attributes: AttrMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}
