//! # Geometry Engine
//!
//! Areas, perimeters and footprint polygons computed from the model's
//! cartesian points (already converted to feet).
//!
//! - [`plane_areas`] / [`projected_area`] - Delaunay triangulation of a 2D
//!   projection, summed with Heron's formula
//! - [`perimeter`] / [`footing_perimeter_polygon`] - 3D convex hull
//! - [`roof_perimeter`] - closed walk over the points at maximum elevation
//! - [`coordinates_from_model`] - collects the points from a model
//!
//! ## Degenerate input
//!
//! Fewer than three distinct points is "no geometry", not an error: the
//! area and perimeter functions return `0.0` and the footing polygon is
//! empty. Repeated placements at one location count once. The hull-based
//! functions return [`TakeoffError::Geometry`] only when the hull algorithm
//! itself rejects the input.
//!
//! [`TakeoffError::Geometry`]: crate::errors::TakeoffError::Geometry

pub mod area;
pub mod coordinates;
pub mod hull;
pub mod roof;

pub use area::{plane_areas, projected_area, PlaneAreas};
pub use coordinates::coordinates_from_model;
pub use hull::{footing_perimeter_polygon, perimeter};
pub use roof::roof_perimeter;

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::units::to_display_feet;

/// A point in display units (feet), rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3D {
    /// A point already in feet
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    /// Convert raw model coordinates (inches) to feet, rounded to 2 decimals
    ///
    /// ```rust
    /// use takeoff_core::geometry::Point3D;
    ///
    /// let p = Point3D::from_raw([120.0, 6.0, 100.0]);
    /// assert_eq!((p.x(), p.y(), p.z()), (10.0, 0.5, 8.33));
    /// ```
    pub fn from_raw(raw: [f64; 3]) -> Self {
        Point3D::new(to_display_feet(raw[0]), to_display_feet(raw[1]), to_display_feet(raw[2]))
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Coordinates as an array
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A pair of coordinate axes to project onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPair {
    XY,
    YZ,
    XZ,
}

impl AxisPair {
    /// The three planes in reporting order
    pub const ALL: [AxisPair; 3] = [AxisPair::XY, AxisPair::YZ, AxisPair::XZ];

    /// Drop the third coordinate
    pub fn project(self, point: &Point3D) -> [f64; 2] {
        match self {
            AxisPair::XY => [point.x, point.y],
            AxisPair::YZ => [point.y, point.z],
            AxisPair::XZ => [point.x, point.z],
        }
    }
}

/// Points in discovery order.
///
/// Order does not matter to the area and perimeter computations, but is
/// kept for consumers that report the first few points and for
/// [`roof_perimeter`], which walks the roof points in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateSet(Vec<Point3D>);

impl CoordinateSet {
    pub fn new() -> Self {
        CoordinateSet(Vec::new())
    }

    /// Build from raw coordinate tuples (model units).
    ///
    /// Every tuple must have exactly three components; mixed or planar
    /// tuples are a geometry error.
    pub fn from_raw_tuples(tuples: &[Vec<f64>]) -> TakeoffResult<Self> {
        let mut points = Vec::with_capacity(tuples.len());
        for (position, tuple) in tuples.iter().enumerate() {
            match tuple.as_slice() {
                [x, y, z] => points.push(Point3D::from_raw([*x, *y, *z])),
                other => {
                    return Err(TakeoffError::geometry(
                        "coordinates",
                        format!(
                            "point {} has {} components; every point needs exactly 3",
                            position,
                            other.len()
                        ),
                    ))
                }
            }
        }
        Ok(CoordinateSet(points))
    }

    pub fn push(&mut self, point: Point3D) {
        self.0.push(point);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Point3D] {
        &self.0
    }

    /// The first `n` points in discovery order
    pub fn first_n(&self, n: usize) -> &[Point3D] {
        &self.0[..n.min(self.0.len())]
    }
}

impl From<Vec<Point3D>> for CoordinateSet {
    fn from(points: Vec<Point3D>) -> Self {
        CoordinateSet(points)
    }
}

impl FromIterator<Point3D> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = Point3D>>(iter: I) -> Self {
        CoordinateSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Point3D;
    type IntoIter = std::slice::Iter<'a, Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_tuples() {
        let set = CoordinateSet::from_raw_tuples(&[vec![0.0, 0.0, 0.0], vec![24.0, 12.0, 6.0]]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[1], Point3D::new(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_mixed_dimensionality_rejected() {
        let err = CoordinateSet::from_raw_tuples(&[vec![0.0, 0.0, 0.0], vec![1.0, 2.0]]).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");
        assert!(err.to_string().contains("point 1 has 2 components"));
    }

    #[test]
    fn test_first_n_is_clamped() {
        let set: CoordinateSet = (0..3).map(|i| Point3D::new(i as f64, 0.0, 0.0)).collect();
        assert_eq!(set.first_n(2).len(), 2);
        assert_eq!(set.first_n(10).len(), 3);
        assert_eq!(set.first_n(1)[0].x(), 0.0);
    }

    #[test]
    fn test_projection() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(AxisPair::XY.project(&p), [1.0, 2.0]);
        assert_eq!(AxisPair::YZ.project(&p), [2.0, 3.0]);
        assert_eq!(AxisPair::XZ.project(&p), [1.0, 3.0]);
    }
}
