//! End-to-end tests for the orientation engine.
//!
//! Orientation is the deviation of an object's long axis from the nearest
//! cardinal direction, folded into [0, 45]. The fold makes the value
//! invariant under 90-degree rotation, which is the main property checked
//! here on randomly rotated rectangles.

use geo::{polygon, Geometry, Rotate};
use morpho_rs::{orientation, ObjectId, ObjectTable, SpatialObject};
use proptest::prelude::*;

fn rectangle(id: u64, width: f64, height: f64) -> SpatialObject {
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: width, y: 0.0),
        (x: width, y: height),
        (x: 0.0, y: height),
    ];
    SpatialObject::new(ObjectId(id), Geometry::Polygon(poly))
}

fn rotated(obj: SpatialObject, degrees: f64) -> SpatialObject {
    let Geometry::Polygon(poly) = &obj.geometry else {
        unreachable!("rectangle helper always builds polygons");
    };
    SpatialObject::new(obj.id, Geometry::Polygon(poly.rotate_around_centroid(degrees)))
}

// ============================================================================
// 1. Known orientations
// ============================================================================

#[test]
fn test_axis_aligned_rectangle_is_zero() {
    let table = ObjectTable::from_rows(vec![rectangle(1, 4.0, 2.0)]).unwrap();
    let series = orientation(&table).unwrap();
    assert!(series.get(0).unwrap().abs() < 1e-9);
}

#[test]
fn test_vertical_rectangle_is_zero() {
    // Long axis vertical: still cardinal, still zero deviation.
    let table = ObjectTable::from_rows(vec![rectangle(1, 2.0, 4.0)]).unwrap();
    let series = orientation(&table).unwrap();
    assert!(series.get(0).unwrap().abs() < 1e-9);
}

#[test]
fn test_diagonal_rectangle_is_forty_five() {
    let table =
        ObjectTable::from_rows(vec![rotated(rectangle(1, 4.0, 2.0), 45.0)]).unwrap();
    let series = orientation(&table).unwrap();
    assert!((series.get(0).unwrap() - 45.0).abs() < 1e-6);
}

#[test]
fn test_known_tilt() {
    let table =
        ObjectTable::from_rows(vec![rotated(rectangle(1, 4.0, 2.0), 10.0)]).unwrap();
    let series = orientation(&table).unwrap();
    assert!((series.get(0).unwrap() - 10.0).abs() < 1e-6);
}

// ============================================================================
// 2. Lines orient along their endpoint chord
// ============================================================================

#[test]
fn test_line_orientation_ignores_interior_vertices() {
    use geo::line_string;
    // A wiggly line whose endpoints are horizontal.
    let line = line_string![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 2.0),
        (x: 2.0, y: -1.0),
        (x: 4.0, y: 0.0),
    ];
    let table = ObjectTable::from_rows(vec![SpatialObject::new(
        ObjectId(1),
        Geometry::LineString(line),
    )])
    .unwrap();
    let series = orientation(&table).unwrap();
    assert!(series.get(0).unwrap().abs() < 1e-9);
}

// ============================================================================
// 3. Properties on random rotations
// ============================================================================

proptest! {
    /// Orientation always lands in [0, 45].
    #[test]
    fn prop_orientation_in_range(angle in 0.0f64..360.0) {
        let table =
            ObjectTable::from_rows(vec![rotated(rectangle(1, 3.0, 1.0), angle)]).unwrap();
        let value = orientation(&table).unwrap().get(0).unwrap();
        prop_assert!(value >= -1e-9);
        prop_assert!(value <= 45.0 + 1e-9);
    }

    /// Rotating an object by a quarter turn does not change its orientation.
    #[test]
    fn prop_quarter_turn_invariant(angle in 0.0f64..90.0) {
        let base = rotated(rectangle(1, 3.0, 1.0), angle);
        let turned = rotated(rectangle(2, 3.0, 1.0), angle + 90.0);
        let table = ObjectTable::from_rows(vec![base, turned]).unwrap();
        let series = orientation(&table).unwrap();
        let diff = (series.get(0).unwrap() - series.get(1).unwrap()).abs();
        prop_assert!(diff < 1e-6, "quarter turn changed orientation by {diff}");
    }
}
