use crate::interface::SpectrumPoint;
use crate::prelude::{AngleEstimate, EngineResult};
use crate::simulation::manifold::steering_vector;
use ndarray::Array2;
use num_complex::Complex64;
use std::cmp::Ordering;

const DENOMINATOR_EPSILON: f64 = 1e-12;

/// MUSIC pseudospectrum estimator over a fixed angular search grid.
///
/// The default grid scans 0..=90 degrees in 1-degree steps; a finer step
/// trades latency for resolution.
pub struct MusicEstimator {
    pub grid_start_deg: f64,
    pub grid_stop_deg: f64,
    pub grid_step_deg: f64,
}

impl Default for MusicEstimator {
    fn default() -> Self {
        Self {
            grid_start_deg: 0.0,
            grid_stop_deg: 90.0,
            grid_step_deg: 1.0,
        }
    }
}

impl MusicEstimator {
    /// Scan the grid against the noise subspace and pick the strongest
    /// local maxima as source bearings.
    pub fn estimate(
        &self,
        noise_subspace: &Array2<Complex64>,
        num_sources: usize,
        spacing: f64,
    ) -> EngineResult<(AngleEstimate, Vec<SpectrumPoint>)> {
        let spectrum = self.pseudospectrum(noise_subspace, spacing);

        let mut candidates: Vec<(f64, f64)> = Vec::new();
        for i in 1..spectrum.len().saturating_sub(1) {
            if spectrum[i].power > spectrum[i - 1].power
                && spectrum[i].power > spectrum[i + 1].power
            {
                candidates.push((spectrum[i].power, spectrum[i].angle_deg));
            }
        }
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let mut angles: Vec<f64> = candidates
            .iter()
            .take(num_sources)
            .map(|&(_, angle)| angle)
            .collect();
        let shortfall = angles.len() < num_sources;
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Ok((
            AngleEstimate {
                angles_deg: angles,
                shortfall,
            },
            spectrum,
        ))
    }

    /// `P(theta) = 1 / sum |a(theta)^H v|^2` over the noise eigenvectors.
    ///
    /// The denominator is floored at a small epsilon: a degenerate
    /// projection then reports the grid maximum instead of dividing by zero.
    fn pseudospectrum(
        &self,
        noise_subspace: &Array2<Complex64>,
        spacing: f64,
    ) -> Vec<SpectrumPoint> {
        let num_elements = noise_subspace.nrows();
        let mut points = Vec::new();
        let mut angle = self.grid_start_deg;
        while angle <= self.grid_stop_deg + 1e-9 {
            let steering = steering_vector(angle, num_elements, spacing);
            let mut denominator = 0.0;
            for column in noise_subspace.columns() {
                let projection: Complex64 = steering
                    .iter()
                    .zip(column.iter())
                    .map(|(a, v)| a.conj() * v)
                    .sum();
                denominator += projection.norm_sqr();
            }
            points.push(SpectrumPoint {
                angle_deg: angle,
                power: 1.0 / denominator.max(DENOMINATOR_EPSILON),
            });
            angle += self.grid_step_deg;
        }
        points
    }
}
