//! Serialization round trips for the shareable artifacts.
//!
//! Graphs, patch assignments and result series are the pieces a caller
//! persists between pipeline stages; each must survive a JSON round trip
//! unchanged.

use geo::{polygon, Geometry};
use morpho_rs::{
    compute_patches, queen_contiguity, AdjacencyGraph, ObjectId, ObjectTable, PatchAssignment,
    ResultSeries, SpatialObject,
};
use pretty_assertions::assert_eq;

fn square(id: u64, x: f64, y: f64) -> SpatialObject {
    let poly = polygon![
        (x: x, y: y),
        (x: x + 1.0, y: y),
        (x: x + 1.0, y: y + 1.0),
        (x: x, y: y + 1.0),
    ];
    SpatialObject::new(ObjectId(id), Geometry::Polygon(poly))
}

fn sample_table() -> ObjectTable {
    ObjectTable::from_rows(vec![
        square(1, 0.0, 0.0),
        square(2, 1.0, 0.0),
        square(3, 5.0, 5.0),
    ])
    .unwrap()
}

// ============================================================================
// 1. Adjacency graph
// ============================================================================

#[test]
fn test_graph_roundtrip() {
    let graph = queen_contiguity(&sample_table()).unwrap();

    let json = serde_json::to_string(&graph).unwrap();
    let back: AdjacencyGraph = serde_json::from_str(&json).unwrap();

    assert_eq!(back, graph);
    assert_eq!(back.neighbors(ObjectId(1)), &[ObjectId(2)]);
}

// ============================================================================
// 2. Patch assignment
// ============================================================================

#[test]
fn test_patches_roundtrip() {
    let table = sample_table();
    let graph = queen_contiguity(&table).unwrap();
    let patches = compute_patches(&table, &graph);

    let json = serde_json::to_string(&patches).unwrap();
    let back: PatchAssignment = serde_json::from_str(&json).unwrap();

    assert_eq!(back, patches);
    assert_eq!(back.patch_count(), 2);
}

// ============================================================================
// 3. Result series
// ============================================================================

#[test]
fn test_series_roundtrip() {
    let series = ResultSeries::from(vec![0.0, 12.5, 45.0]);

    let json = serde_json::to_string(&series).unwrap();
    let back: ResultSeries = serde_json::from_str(&json).unwrap();

    assert_eq!(back, series);
}

// ============================================================================
// 4. Object table rebuilds its id map
// ============================================================================

#[test]
fn test_table_roundtrip_restores_lookup() {
    let table = sample_table();

    let json = serde_json::to_string(&table).unwrap();
    let back: ObjectTable = serde_json::from_str(&json).unwrap();

    assert_eq!(back.len(), 3);
    // Id lookup works on the deserialized table, not just row access.
    assert_eq!(back.row_of(ObjectId(2)), Some(1));
    assert_eq!(back.by_id(ObjectId(3)).map(|obj| obj.id), Some(ObjectId(3)));
}

#[test]
fn test_table_deserialize_rejects_duplicate_ids() {
    // Hand-built payload with the same id twice: construction rules apply
    // on the way in as well.
    let rows = vec![square(1, 0.0, 0.0), square(1, 2.0, 0.0)];
    let json = format!(
        "{{\"rows\":{}}}",
        serde_json::to_string(&rows).unwrap()
    );

    let result: Result<ObjectTable, _> = serde_json::from_str(&json);
    assert!(result.is_err());
}

// ============================================================================
// 5. Objects serialize with their geometry and attributes
// ============================================================================

#[test]
fn test_object_serializes_attributes() {
    let obj = square(7, 0.0, 0.0).with_attribute("orientation", 12.5);

    let json = serde_json::to_string(&obj).unwrap();
    let back: SpatialObject = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, ObjectId(7));
    assert_eq!(back.get("orientation").and_then(|v| v.as_float()), Some(12.5));
}
