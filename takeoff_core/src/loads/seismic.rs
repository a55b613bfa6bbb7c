//! Seismic base shear methods.
//!
//! Textbook forms of the common approaches, for comparing against the
//! simplified site-class load. Units follow the inputs; nothing is rounded.

use nalgebra::{DMatrix, DVector, Vector3};

use crate::errors::{TakeoffError, TakeoffResult};

/// Equivalent lateral force: `V = Cs * W`
pub fn equivalent_static(weight: f64, response_coefficient: f64) -> f64 {
    response_coefficient * weight
}

/// Response spectrum SRSS combination of directional shears
///
/// ```rust
/// use takeoff_core::loads::seismic::response_spectrum_srss;
///
/// assert_eq!(response_spectrum_srss(3.0, 4.0, 12.0), 13.0);
/// ```
pub fn response_spectrum_srss(vx: f64, vy: f64, vz: f64) -> f64 {
    Vector3::new(vx, vy, vz).norm()
}

/// Time history base shear: `V = sum(m_i * a_i)`
pub fn time_history(masses: &[f64], accelerations: &[f64]) -> TakeoffResult<f64> {
    if masses.len() != accelerations.len() {
        return Err(TakeoffError::invalid_input(
            "accelerations",
            accelerations.len().to_string(),
            format!("expected one acceleration per mass ({})", masses.len()),
        ));
    }
    Ok(DVector::from_column_slice(masses).dot(&DVector::from_column_slice(accelerations)))
}

/// Modal superposition: `U_j = sum_i(phi_ij * q_i)`.
///
/// `mode_shapes[i]` is mode `i`, one entry per degree of freedom `j`;
/// `generalized_coords[i]` is the participation of mode `i`. Each mode is
/// scaled by its own coordinate. This is not the element-wise broadcast
/// `U_j = q_j * sum_i(phi_ij)`, which scales degree of freedom `j` by the
/// coordinate of mode `j`. For shapes `[[1, .8, .6], [.9, .7, .5], [.8, .6, .4]]`
/// and `q = [.05, .04, .03]` this gives `[0.11, 0.086, 0.062]`; the
/// broadcast would give `[0.135, 0.084, 0.045]`.
pub fn modal_response(mode_shapes: &[Vec<f64>], generalized_coords: &[f64]) -> TakeoffResult<Vec<f64>> {
    if mode_shapes.len() != generalized_coords.len() {
        return Err(TakeoffError::invalid_input(
            "generalized_coords",
            generalized_coords.len().to_string(),
            format!("expected one coordinate per mode ({})", mode_shapes.len()),
        ));
    }
    let Some(first) = mode_shapes.first() else {
        return Ok(Vec::new());
    };
    let dofs = first.len();
    if let Some((mode, shape)) = mode_shapes.iter().enumerate().find(|(_, shape)| shape.len() != dofs) {
        return Err(TakeoffError::invalid_input(
            format!("mode_shapes[{}]", mode),
            shape.len().to_string(),
            format!("every mode needs {} entries", dofs),
        ));
    }

    let phi = DMatrix::from_fn(mode_shapes.len(), dofs, |i, j| mode_shapes[i][j]);
    let q = DVector::from_column_slice(generalized_coords);
    Ok((phi.transpose() * q).iter().copied().collect())
}

/// Capacity spectrum spectral acceleration: `Sa = Sd / (T * (1 + xi))`
pub fn capacity_spectrum(spectral_displacement: f64, period: f64, damping_ratio: f64) -> f64 {
    spectral_displacement / (period * (1.0 + damping_ratio))
}

/// ASCE 7 design base shear: `V = SDS / (R / I) * W`
pub fn design_base_shear(weight: f64, sds: f64, response_modification: f64, importance: f64) -> f64 {
    sds / (response_modification / importance) * weight
}
