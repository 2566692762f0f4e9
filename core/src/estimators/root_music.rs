use crate::math::poly::PolynomialSolver;
use crate::prelude::{AngleEstimate, EngineResult};
use crate::simulation::manifold::phase_to_bearing_deg;
use ndarray::Array2;
use num_complex::Complex64;
use std::cmp::Ordering;

/// Root-MUSIC: trades the angular grid search for polynomial rooting.
///
/// Faster than a grid scan but sensitive to the conditioning of the
/// noise-subspace polynomial.
pub struct RootMusicEstimator;

impl RootMusicEstimator {
    pub fn estimate(
        noise_subspace: &Array2<Complex64>,
        num_sources: usize,
        spacing: f64,
    ) -> EngineResult<AngleEstimate> {
        let num_elements = noise_subspace.nrows();

        // noise-subspace correlation C = sum v v^H
        let mut correlation = Array2::<Complex64>::zeros((num_elements, num_elements));
        for column in noise_subspace.columns() {
            for i in 0..num_elements {
                for j in 0..num_elements {
                    correlation[(i, j)] += column[i] * column[j].conj();
                }
            }
        }

        // coefficient k is the k-th diagonal sum of C, k in -(N-1)..=(N-1)
        let order = num_elements as isize - 1;
        let mut coefficients = Vec::with_capacity(2 * num_elements - 1);
        for k in -order..=order {
            let mut sum = Complex64::new(0.0, 0.0);
            for i in 0..num_elements as isize {
                let j = i + k;
                if (0..num_elements as isize).contains(&j) {
                    sum += correlation[(i as usize, j as usize)];
                }
            }
            coefficients.push(sum);
        }

        let roots = PolynomialSolver::roots(&coefficients);

        // roots pair up as (z, 1/conj(z)); keep the inside-circle partner,
        // nearest the unit circle first
        let mut candidates: Vec<Complex64> =
            roots.into_iter().filter(|root| root.norm() < 1.0).collect();
        candidates.sort_by(|a, b| {
            (1.0 - a.norm())
                .abs()
                .partial_cmp(&(1.0 - b.norm()).abs())
                .unwrap_or(Ordering::Equal)
        });

        let mut angles = Vec::with_capacity(num_sources);
        for root in candidates {
            if angles.len() == num_sources {
                break;
            }
            if let Some(bearing) = phase_to_bearing_deg(root.arg(), spacing) {
                angles.push(bearing);
            }
        }

        let shortfall = angles.len() < num_sources;
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Ok(AngleEstimate {
            angles_deg: angles,
            shortfall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::DoaParameters;
    use crate::math::eigen::HermitianEigenSolver;
    use crate::simulation::covariance::CovarianceEstimator;
    use crate::simulation::snapshot::SignalSimulator;

    fn noise_subspace_for(params: &DoaParameters) -> Array2<Complex64> {
        let snapshots = SignalSimulator::simulate(params).unwrap();
        let covariance = CovarianceEstimator::estimate(&snapshots).unwrap();
        let decomposition = HermitianEigenSolver::decompose(&covariance).unwrap();
        decomposition.split(params.num_sources()).unwrap().noise
    }

    #[test]
    fn high_snr_sources_are_located_off_grid() {
        let params = DoaParameters {
            snapshots: 300,
            array_elements: 8,
            snr_db: 40.0,
            source_angles: vec![20.0, 60.0],
            seed: 5,
            ..Default::default()
        };
        let noise = noise_subspace_for(&params);
        let estimate = RootMusicEstimator::estimate(&noise, 2, params.array_spacing).unwrap();
        assert_eq!(estimate.angles_deg.len(), 2);
        assert!(!estimate.shortfall);
        assert!((estimate.angles_deg[0] - 20.0).abs() < 1.0);
        assert!((estimate.angles_deg[1] - 60.0).abs() < 1.0);
    }

    #[test]
    fn negative_bearings_are_representable() {
        let params = DoaParameters {
            snapshots: 300,
            array_elements: 8,
            snr_db: 40.0,
            source_angles: vec![-30.0, 25.0],
            seed: 9,
            ..Default::default()
        };
        let noise = noise_subspace_for(&params);
        let estimate = RootMusicEstimator::estimate(&noise, 2, params.array_spacing).unwrap();
        assert_eq!(estimate.angles_deg.len(), 2);
        assert!((estimate.angles_deg[0] + 30.0).abs() < 1.0);
        assert!((estimate.angles_deg[1] - 25.0).abs() < 1.0);
    }

    #[test]
    fn estimates_come_back_sorted() {
        let params = DoaParameters {
            snapshots: 200,
            array_elements: 10,
            snr_db: 15.0,
            source_angles: vec![10.0, 35.0, 65.0],
            seed: 21,
            ..Default::default()
        };
        let noise = noise_subspace_for(&params);
        let estimate = RootMusicEstimator::estimate(&noise, 3, params.array_spacing).unwrap();
        for pair in estimate.angles_deg.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}
