//! # Geometric Descriptors
//!
//! Per-object geometry: the azimuth/orientation engine, boundary overlap
//! length, perimeter and pairwise distance. All planar, all Euclidean.
//!
//! The orientation routine is the one piece reused verbatim across metrics:
//! polygons take the long axis of their minimum rotated rectangle, street
//! segments take the chord from first to last coordinate, and both fold the
//! resulting 0–180° azimuth into a canonical 0–45° deviation from the
//! cardinal directions.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{
    BoundingRect, Coord, EuclideanDistance, EuclideanLength, Geometry, Line, LineString,
    MinimumRotatedRect, Polygon, Rect,
};

use crate::model::ObjectId;
use crate::{Error, Result};

// ============================================================================
// Azimuth + fold
// ============================================================================

/// Azimuth between two coordinates, in degrees on the interval (0, 180].
///
/// Measured clockwise from north (`atan2(dx, dy)`), shifted by 180° when the
/// raw angle is not positive so that opposite directions coincide.
pub(crate) fn azimuth(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let angle = (b.x - a.x).atan2(b.y - a.y).to_degrees();
    if angle > 0.0 { angle } else { angle + 180.0 }
}

/// Fold a 0–180° azimuth into the canonical 0–45° range.
///
/// Three-stage mirroring: [45, 90) reflects about 45; [90, 135) about 90
/// then 45; [135, 181) about 135, 90, then 45. The result is insensitive to
/// which of the four compass quadrants the axis points into.
pub(crate) fn fold_to_45(mut az: f64) -> f64 {
    if (45.0..90.0).contains(&az) {
        az -= 2.0 * (az - 45.0);
    } else if (90.0..135.0).contains(&az) {
        az -= 2.0 * (az - 90.0);
        az -= 2.0 * (az - 45.0);
    } else if (135.0..181.0).contains(&az) {
        az -= 2.0 * (az - 135.0);
        az -= 2.0 * (az - 90.0);
        az -= 2.0 * (az - 45.0);
    }
    az
}

// ============================================================================
// Orientation
// ============================================================================

/// Canonical 0–45° orientation of a single object.
///
/// After Schirmer & Axhausen (2015): deviation of the long axis of the
/// minimum bounding rectangle from the cardinal directions. Street segments
/// use the first/last coordinate chord instead of a bounding rectangle.
///
/// Degenerate geometry (no rotated rectangle, zero-length axis) is an error,
/// never a silent 0 — callers needing robustness pre-filter their input.
pub fn orientation_of(id: ObjectId, geometry: &Geometry<f64>) -> Result<f64> {
    match geometry {
        Geometry::Polygon(poly) => polygon_orientation(id, poly),
        Geometry::LineString(line) => line_orientation(id, line),
        _ => Err(invalid(id, "orientation requires a polygon or a line")),
    }
}

fn polygon_orientation(id: ObjectId, poly: &Polygon<f64>) -> Result<f64> {
    let mbr = MinimumRotatedRect::minimum_rotated_rect(poly)
        .ok_or_else(|| invalid(id, "no minimum rotated rectangle"))?;
    // Closed exterior ring: corners at 0..=3, coord 4 repeats coord 0.
    let ring = &mbr.exterior().0;
    if ring.len() < 5 {
        return Err(invalid(id, "degenerate bounding rectangle"));
    }
    let ab = midpoint(ring[0], ring[1]);
    let cd = midpoint(ring[2], ring[3]);
    let bc = midpoint(ring[1], ring[2]);
    let da = midpoint(ring[3], ring[0]);

    // The two perpendicular midpoint-to-midpoint axes; keep the longer one.
    let axis1 = coord_distance(ab, cd);
    let axis2 = coord_distance(bc, da);
    let (start, end, length) = if axis1 <= axis2 {
        (bc, da, axis2)
    } else {
        (ab, cd, axis1)
    };
    if length == 0.0 {
        return Err(invalid(id, "zero-length long axis"));
    }
    Ok(fold_to_45(azimuth(start, end)))
}

fn line_orientation(id: ObjectId, line: &LineString<f64>) -> Result<f64> {
    let first = line.0.first().copied();
    let last = line.0.last().copied();
    match (first, last) {
        (Some(a), Some(b)) if a != b => Ok(fold_to_45(azimuth(a, b))),
        _ => Err(invalid(id, "zero-length line")),
    }
}

fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

fn coord_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

// ============================================================================
// Boundary overlap
// ============================================================================

/// Total length of the shared boundary between two geometries.
///
/// Sums the collinear overlap of every boundary-segment pair. Touching at a
/// single point contributes nothing; disjoint geometries yield 0.
pub fn shared_boundary_length(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    let mut total = 0.0;
    let b_lines = boundary_lines(b);
    for la in boundary_lines(a) {
        for &lb in &b_lines {
            if let Some(LineIntersection::Collinear { intersection }) = line_intersection(la, lb) {
                total += line_length(intersection);
            }
        }
    }
    total
}

fn boundary_lines(geometry: &Geometry<f64>) -> Vec<Line<f64>> {
    match geometry {
        Geometry::Polygon(poly) => {
            let mut lines: Vec<Line<f64>> = poly.exterior().lines().collect();
            for interior in poly.interiors() {
                lines.extend(interior.lines());
            }
            lines
        }
        Geometry::LineString(line) => line.lines().collect(),
        _ => Vec::new(),
    }
}

fn line_length(line: Line<f64>) -> f64 {
    line.dx().hypot(line.dy())
}

// ============================================================================
// Length and distance
// ============================================================================

/// Boundary length of an object: polygon perimeter (exterior plus any holes)
/// or line length.
pub fn perimeter(id: ObjectId, geometry: &Geometry<f64>) -> Result<f64> {
    match geometry {
        Geometry::Polygon(poly) => {
            let mut length = poly.exterior().euclidean_length();
            for interior in poly.interiors() {
                length += interior.euclidean_length();
            }
            Ok(length)
        }
        Geometry::LineString(line) => Ok(line.euclidean_length()),
        _ => Err(invalid(id, "perimeter requires a polygon or a line")),
    }
}

/// Euclidean distance between two geometries (0 when they intersect).
pub fn distance(id: ObjectId, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<f64> {
    match (a, b) {
        (Geometry::Polygon(p), Geometry::Polygon(q)) => Ok(p.euclidean_distance(q)),
        (Geometry::LineString(l), Geometry::LineString(m)) => Ok(l.euclidean_distance(m)),
        (Geometry::Polygon(p), Geometry::LineString(l))
        | (Geometry::LineString(l), Geometry::Polygon(p)) => Ok(l.euclidean_distance(p)),
        (Geometry::Point(p), Geometry::Point(q)) => Ok(p.euclidean_distance(q)),
        (Geometry::Point(p), Geometry::Polygon(q)) | (Geometry::Polygon(q), Geometry::Point(p)) => {
            Ok(p.euclidean_distance(q))
        }
        (Geometry::Point(p), Geometry::LineString(l))
        | (Geometry::LineString(l), Geometry::Point(p)) => Ok(p.euclidean_distance(l)),
        _ => Err(invalid(id, "unsupported geometry pair for distance")),
    }
}

/// Axis-aligned bounding box, or an error for empty geometry.
pub fn bounding_box(id: ObjectId, geometry: &Geometry<f64>) -> Result<Rect<f64>> {
    geometry
        .bounding_rect()
        .ok_or_else(|| invalid(id, "no bounding box"))
}

fn invalid(id: ObjectId, reason: &str) -> Error {
    Error::InvalidGeometry {
        id,
        reason: reason.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fold_identity_below_45() {
        assert!((fold_to_45(30.0) - 30.0).abs() < EPS);
        assert!((fold_to_45(0.0) - 0.0).abs() < EPS);
        assert!((fold_to_45(45.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_fold_reflections() {
        // One reflection about 45.
        assert!((fold_to_45(60.0) - 30.0).abs() < EPS);
        // Two reflections: 100 -> 80 -> 10.
        assert!((fold_to_45(100.0) - 10.0).abs() < EPS);
        // Three reflections: 170 -> 100 -> 80 -> 10.
        assert!((fold_to_45(170.0) - 10.0).abs() < EPS);
        // Cardinal wrap: 180 folds back to 0.
        assert!((fold_to_45(180.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_azimuth_quadrants() {
        let origin = Coord { x: 0.0, y: 0.0 };
        // Due east.
        assert!((azimuth(origin, Coord { x: 1.0, y: 0.0 }) - 90.0).abs() < EPS);
        // Due north: atan2(0, 1) = 0, shifted to 180.
        assert!((azimuth(origin, Coord { x: 0.0, y: 1.0 }) - 180.0).abs() < EPS);
        // North-east diagonal.
        assert!((azimuth(origin, Coord { x: 1.0, y: 1.0 }) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_axis_aligned_rectangle_orientation_zero() {
        // Long side along the y-axis.
        let rect = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 3.0),
            (x: 0.0, y: 3.0),
        ];
        let ori = orientation_of(ObjectId(1), &Geometry::Polygon(rect)).unwrap();
        assert!(ori.abs() < 1e-6, "expected 0, got {ori}");
    }

    #[test]
    fn test_diagonal_rectangle_orientation_45() {
        // Long axis at exactly 45 degrees.
        let rect = polygon![
            (x: 0.0, y: 0.0),
            (x: 3.0, y: 3.0),
            (x: 2.5, y: 3.5),
            (x: -0.5, y: 0.5),
        ];
        let ori = orientation_of(ObjectId(1), &Geometry::Polygon(rect)).unwrap();
        assert!((ori - 45.0).abs() < 1e-6, "expected 45, got {ori}");
    }

    #[test]
    fn test_line_orientation_uses_endpoints() {
        // Wiggly interior coordinates are ignored; only the chord counts.
        let street = line_string![
            (x: 0.0, y: 0.0),
            (x: 0.2, y: 1.0),
            (x: 0.0, y: 2.0),
        ];
        let ori = orientation_of(ObjectId(1), &Geometry::LineString(street)).unwrap();
        assert!(ori.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_line_is_error() {
        let point_line = line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 1.0)];
        let result = orientation_of(ObjectId(7), &Geometry::LineString(point_line));
        assert!(matches!(
            result,
            Err(Error::InvalidGeometry { id: ObjectId(7), .. })
        ));
    }

    #[test]
    fn test_shared_boundary_full_edge() {
        let left = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let right = polygon![
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 1.0, y: 1.0),
        ];
        let length = shared_boundary_length(
            &Geometry::Polygon(left),
            &Geometry::Polygon(right),
        );
        assert!((length - 1.0).abs() < EPS, "expected 1.0, got {length}");
    }

    #[test]
    fn test_shared_boundary_corner_touch_is_zero() {
        let a = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let b = polygon![
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 1.0),
            (x: 2.0, y: 2.0),
            (x: 1.0, y: 2.0),
        ];
        let length = shared_boundary_length(&Geometry::Polygon(a), &Geometry::Polygon(b));
        assert!(length.abs() < EPS);
    }

    #[test]
    fn test_shared_boundary_partial_overlap() {
        let a = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        // Shares only half of a's top edge.
        let b = polygon![
            (x: 1.0, y: 1.0),
            (x: 3.0, y: 1.0),
            (x: 3.0, y: 2.0),
            (x: 1.0, y: 2.0),
        ];
        let length = shared_boundary_length(&Geometry::Polygon(a), &Geometry::Polygon(b));
        assert!((length - 1.0).abs() < EPS, "expected 1.0, got {length}");
    }

    #[test]
    fn test_perimeter_of_unit_square() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let p = perimeter(ObjectId(1), &Geometry::Polygon(square)).unwrap();
        assert!((p - 4.0).abs() < EPS);
    }

    #[test]
    fn test_distance_between_separated_squares() {
        let a = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let b = polygon![
            (x: 3.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 1.0),
            (x: 3.0, y: 1.0),
        ];
        let d = distance(ObjectId(1), &Geometry::Polygon(a), &Geometry::Polygon(b)).unwrap();
        assert!((d - 2.0).abs() < EPS);
    }
}
