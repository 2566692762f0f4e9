use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Steering vector of a uniform linear array for a plane wave from
/// `angle_deg`. Element `i` carries phase `2*pi*spacing*i*sin(angle)`.
pub fn steering_vector(angle_deg: f64, num_elements: usize, spacing: f64) -> Array1<Complex64> {
    let sine = angle_deg.to_radians().sin();
    Array1::from_iter((0..num_elements).map(|element| {
        let phase = 2.0 * PI * spacing * element as f64 * sine;
        Complex64::from_polar(1.0, phase)
    }))
}

/// Steering matrix with one column per source bearing.
pub fn steering_matrix(angles_deg: &[f64], num_elements: usize, spacing: f64) -> Array2<Complex64> {
    let mut matrix = Array2::zeros((num_elements, angles_deg.len()));
    for (column, &angle) in angles_deg.iter().enumerate() {
        matrix
            .column_mut(column)
            .assign(&steering_vector(angle, num_elements, spacing));
    }
    matrix
}

/// Invert the manifold phase increment back to a bearing in degrees.
///
/// Returns `None` when the phase has no physical bearing in [-90, 90] for
/// the given spacing.
pub fn phase_to_bearing_deg(phase_rad: f64, spacing: f64) -> Option<f64> {
    let sine = phase_rad / (2.0 * PI * spacing);
    if !(-1.0..=1.0).contains(&sine) {
        return None;
    }
    let bearing = sine.asin().to_degrees();
    if (-90.0..=90.0).contains(&bearing) {
        Some(bearing)
    } else {
        None
    }
}
