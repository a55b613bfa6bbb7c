//! Collect cartesian points from a model.

use super::{CoordinateSet, Point3D};
use crate::model::ModelAccess;

/// Every `IfcCartesianPoint` with three numeric coordinates, in feet.
///
/// Planar (2-component) placements are skipped. With `remove_origin` the
/// raw `(0, 0, 0)` point is dropped before unit conversion, so points that
/// only round to zero in feet are kept.
pub fn coordinates_from_model<M: ModelAccess + ?Sized>(model: &M, remove_origin: bool) -> CoordinateSet {
    let mut points = CoordinateSet::new();
    let mut skipped = 0usize;

    for entity in model.by_type("IfcCartesianPoint") {
        let raw = model
            .attribute(entity, "Coordinates")
            .and_then(|value| value.as_f64_list());
        match raw.as_deref() {
            Some(&[x, y, z]) => {
                if remove_origin && x == 0.0 && y == 0.0 && z == 0.0 {
                    continue;
                }
                points.push(Point3D::from_raw([x, y, z]));
            }
            Some(_) => skipped += 1,
            None => {
                tracing::warn!(entity = entity.id, "cartesian point without numeric coordinates");
                skipped += 1;
            }
        }
    }

    tracing::debug!(points = points.len(), skipped, remove_origin, "collected coordinates");
    points
}
