//! Projected plane areas.

use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use super::{AxisPair, Point3D};
use crate::units::round_area;

/// Projected areas on the three coordinate planes, square feet, 1 decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneAreas {
    pub xy: f64,
    pub yz: f64,
    pub xz: f64,
}

impl PlaneAreas {
    /// Areas in `(xy, yz, xz)` order
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.xy, self.yz, self.xz)
    }

    /// The plan (XY) area, used as the roof area for snow and ice
    pub fn roof_area(&self) -> f64 {
        self.xy
    }
}

/// Triangle area from its side lengths.
pub fn heron(a: f64, b: f64, c: f64) -> f64 {
    let s = (a + b + c) / 2.0;
    // Slivers can drive the product slightly negative
    (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt()
}

fn distance(p: Point2<f64>, q: Point2<f64>) -> f64 {
    ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
}

/// Area of the Delaunay triangulation of the points projected on `axes`.
///
/// The triangulation covers the convex hull of the projection, so concave
/// notches are filled in.
///
/// Returns `0.0` when fewer than three points are given, or when the
/// projection collapses to a line or a single point.
///
/// ```rust
/// use takeoff_core::geometry::{projected_area, AxisPair, Point3D};
///
/// let pts = [Point3D::new(0.0, 0.0, 0.0), Point3D::new(3.0, 0.0, 0.0), Point3D::new(0.0, 4.0, 0.0)];
/// assert_eq!(projected_area(&pts, AxisPair::XY), 6.0);
/// assert_eq!(projected_area(&pts, AxisPair::YZ), 0.0);
/// ```
pub fn projected_area(points: &[Point3D], axes: AxisPair) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for point in points {
        let [u, v] = axes.project(point);
        // Duplicates collapse onto one vertex; non-finite coordinates are skipped
        if let Err(err) = triangulation.insert(Point2::new(u, v)) {
            tracing::debug!(?axes, u, v, ?err, "point left out of triangulation");
        }
    }

    let area: f64 = triangulation
        .inner_faces()
        .map(|face| {
            let [p0, p1, p2] = face.positions();
            heron(distance(p0, p1), distance(p1, p2), distance(p2, p0))
        })
        .sum();

    tracing::trace!(
        ?axes,
        vertices = triangulation.num_vertices(),
        triangles = triangulation.num_inner_faces(),
        area,
        "projected area"
    );
    round_area(area)
}

/// Projected areas on the XY, YZ and XZ planes.
pub fn plane_areas(points: &[Point3D]) -> PlaneAreas {
    PlaneAreas {
        xy: projected_area(points, AxisPair::XY),
        yz: projected_area(points, AxisPair::YZ),
        xz: projected_area(points, AxisPair::XZ),
    }
}
