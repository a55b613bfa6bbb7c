//! Roof perimeter from the highest points of the model.

use super::Point3D;
use crate::units::round_to;

/// Perimeter of the roof outline, in feet, 2 decimals.
///
/// Takes the points whose elevation equals the maximum elevation exactly and
/// walks their (X, Y) positions in the given order, closing back to the
/// first. The walk order is the discovery order, not a sorted outline, so a
/// roof whose points arrive out of sequence yields a longer zig-zag path.
///
/// Points a hair below the top (floating point noise from the exporter) are
/// not treated as roof points. Fewer than three roof points returns `0.0`.
///
/// ```rust
/// use takeoff_core::geometry::{roof_perimeter, Point3D};
///
/// let roof = [
///     Point3D::new(0.0, 0.0, 10.0),
///     Point3D::new(4.0, 0.0, 10.0),
///     Point3D::new(4.0, 3.0, 10.0),
///     Point3D::new(0.0, 0.0, 0.0),
/// ];
/// assert_eq!(roof_perimeter(&roof), 12.0);
/// ```
pub fn roof_perimeter(points: &[Point3D]) -> f64 {
    let Some(max_z) = points.iter().map(Point3D::z).max_by(f64::total_cmp) else {
        return 0.0;
    };

    let roof: Vec<[f64; 2]> = points
        .iter()
        .filter(|p| p.z() == max_z)
        .map(|p| [p.x(), p.y()])
        .collect();
    if roof.len() < 3 {
        return 0.0;
    }

    let length: f64 = roof
        .iter()
        .zip(roof.iter().cycle().skip(1))
        .map(|(a, b)| ((b[0] - a[0]).powi(2) + (b[1] - a[1]).powi(2)).sqrt())
        .sum();

    tracing::trace!(roof_points = roof.len(), max_z, length, "roof perimeter");
    round_to(length, 2)
}
