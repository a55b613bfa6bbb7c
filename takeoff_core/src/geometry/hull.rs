//! Convex hull perimeter and footing polygon.

use parry3d_f64::na::Point3;
use parry3d_f64::transformation::try_convex_hull;

use super::Point3D;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::units::{round_length, INCHES_PER_FOOT};

/// Points with exact repeats removed, first occurrences kept
fn distinct(points: &[Point3D]) -> Vec<Point3<f64>> {
    let mut cloud: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for p in points {
        let candidate = Point3::new(p.x(), p.y(), p.z());
        if !cloud.contains(&candidate) {
            cloud.push(candidate);
        }
    }
    cloud
}

/// Hull vertices and triangular facets (indices into the vertices).
///
/// `None` when there are fewer than three distinct points.
fn hull(points: &[Point3D], operation: &str) -> TakeoffResult<Option<(Vec<Point3<f64>>, Vec<[u32; 3]>)>> {
    let cloud = distinct(points);
    if cloud.len() < 3 {
        return Ok(None);
    }
    try_convex_hull(&cloud)
        .map(Some)
        .map_err(|err| TakeoffError::geometry(operation, format!("{:?}", err)))
}

/// Footing perimeter from the 3D convex hull, in feet, 1 decimal.
///
/// Each hull facet contributes the length of its first edge, in the order
/// the hull algorithm emits facets; this is not a single closed walk around
/// the footprint. The sum is divided by 12 before rounding.
///
/// Fewer than three distinct points returns `0.0`.
pub fn perimeter(points: &[Point3D]) -> TakeoffResult<f64> {
    let Some((vertices, facets)) = hull(points, "perimeter")? else {
        return Ok(0.0);
    };
    let total: f64 = facets
        .iter()
        .map(|f| (vertices[f[0] as usize] - vertices[f[1] as usize]).norm())
        .sum();

    tracing::debug!(vertices = vertices.len(), facets = facets.len(), total, "hull perimeter");
    Ok(round_length(total / INCHES_PER_FOOT))
}

/// Hull vertices in the order the hull algorithm lists them.
///
/// Used by plotting to outline the footing. Empty when fewer than three
/// distinct points are given.
pub fn footing_perimeter_polygon(points: &[Point3D]) -> TakeoffResult<Vec<Point3D>> {
    let Some((vertices, _)) = hull(points, "footing_perimeter_polygon")? else {
        return Ok(Vec::new());
    };
    Ok(vertices.iter().map(|v| Point3D::new(v.x, v.y, v.z)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(side: f64) -> Vec<Point3D> {
        let mut pts = Vec::new();
        for x in [0.0, side] {
            for y in [0.0, side] {
                for z in [0.0, side] {
                    pts.push(Point3D::new(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(perimeter(&[]).unwrap(), 0.0);
        let two = [Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 1.0, 1.0)];
        assert_eq!(perimeter(&two).unwrap(), 0.0);
        assert!(footing_perimeter_polygon(&two).unwrap().is_empty());
    }

    #[test]
    fn test_coincident_points_return_sentinel() {
        let origin = Point3D::new(0.0, 0.0, 0.0);
        assert_eq!(perimeter(&[origin; 3]).unwrap(), 0.0);
        assert!(footing_perimeter_polygon(&[origin; 5]).unwrap().is_empty());

        // Two distinct locations, repeated
        let pair = [origin, Point3D::new(4.0, 0.0, 0.0), origin, Point3D::new(4.0, 0.0, 0.0)];
        assert_eq!(perimeter(&pair).unwrap(), 0.0);
        assert!(footing_perimeter_polygon(&pair).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_placements_do_not_change_hull() {
        let mut pts = cube(12.0);
        let base = perimeter(&pts).unwrap();
        pts.extend([Point3D::new(0.0, 0.0, 0.0); 6]);
        assert_eq!(perimeter(&pts).unwrap(), base);
        assert_eq!(footing_perimeter_polygon(&pts).unwrap().len(), 8);
    }

    #[test]
    fn test_cube_perimeter_is_positive() {
        let p = perimeter(&cube(24.0)).unwrap();
        assert!(p > 0.0);
        // 12 triangular facets, each first edge is a side or a face diagonal
        let lower = 12.0 * 24.0 / 12.0;
        let upper = 12.0 * 24.0 * 2f64.sqrt() / 12.0;
        assert!(p >= lower - 0.1 && p <= upper + 0.1, "perimeter {}", p);
    }

    #[test]
    fn test_interior_points_do_not_change_hull() {
        let mut pts = cube(12.0);
        let base = perimeter(&pts).unwrap();
        let base_polygon = footing_perimeter_polygon(&pts).unwrap();
        assert_eq!(base_polygon.len(), 8);

        pts.push(Point3D::new(6.0, 6.0, 6.0));
        pts.push(Point3D::new(3.0, 2.0, 9.0));
        let polygon = footing_perimeter_polygon(&pts).unwrap();
        assert_eq!(polygon.len(), 8);
        assert!(polygon.iter().all(|p| p.x() == 0.0 || p.x() == 12.0));
        assert!(perimeter(&pts).unwrap() >= 0.0);
        assert!(base >= 0.0);
    }
}
