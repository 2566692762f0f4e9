use crate::math::complex_mat::MatrixHelper;
use crate::math::poly::PolynomialSolver;
use crate::prelude::{AngleEstimate, EngineResult};
use crate::simulation::manifold::phase_to_bearing_deg;
use ndarray::{s, Array2};
use num_complex::Complex64;
use std::cmp::Ordering;

/// ESPRIT over the two maximally overlapping subarrays of a uniform
/// linear array.
///
/// The rotation operator between the subarray signal subspaces carries the
/// source phases on its eigenvalues; no angular grid is involved.
pub struct EspritEstimator;

impl EspritEstimator {
    pub fn estimate(
        signal_subspace: &Array2<Complex64>,
        spacing: f64,
    ) -> EngineResult<AngleEstimate> {
        let num_elements = signal_subspace.nrows();
        let num_sources = signal_subspace.ncols();

        let upper = signal_subspace.slice(s![..num_elements - 1, ..]).to_owned();
        let lower = signal_subspace.slice(s![1.., ..]).to_owned();

        // least-squares rotation: psi = (E1^H E1)^-1 E1^H E2
        let adjoint = MatrixHelper::hermitian(&upper);
        let normal = MatrixHelper::multiply(&adjoint, &upper)?;
        let projected = MatrixHelper::multiply(&adjoint, &lower)?;
        let rotation = match invert(&normal) {
            Some(inverse) => MatrixHelper::multiply(&inverse, &projected)?,
            None => {
                // singular subarray correlation: no usable rotation operator
                return Ok(AngleEstimate {
                    angles_deg: Vec::new(),
                    shortfall: true,
                });
            }
        };

        let characteristic = characteristic_polynomial(&rotation);
        let eigenvalues = PolynomialSolver::roots(&characteristic);

        let mut angles: Vec<f64> = eigenvalues
            .iter()
            .filter_map(|eigenvalue| phase_to_bearing_deg(eigenvalue.arg(), spacing))
            .collect();
        let shortfall = angles.len() < num_sources;
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Ok(AngleEstimate {
            angles_deg: angles,
            shortfall,
        })
    }
}

/// Monic characteristic polynomial (ascending powers) by the
/// Faddeev-LeVerrier recursion; valid for any small complex matrix.
fn characteristic_polynomial(matrix: &Array2<Complex64>) -> Vec<Complex64> {
    let n = matrix.nrows();
    let mut coefficients = vec![Complex64::new(0.0, 0.0); n + 1];
    coefficients[n] = Complex64::new(1.0, 0.0);

    let mut power = matrix.clone();
    for k in 1..=n {
        let trace: Complex64 = power.diag().iter().copied().sum();
        let coefficient = -trace / k as f64;
        coefficients[n - k] = coefficient;
        if k < n {
            let mut shifted = power.clone();
            for i in 0..n {
                shifted[(i, i)] += coefficient;
            }
            power = matrix.dot(&shifted);
        }
    }
    coefficients
}

/// Gauss-Jordan inversion with partial pivoting; `None` on singularity.
fn invert(matrix: &Array2<Complex64>) -> Option<Array2<Complex64>> {
    let n = matrix.nrows();
    let scale = matrix
        .iter()
        .map(|value| value.norm())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let mut work = matrix.clone();
    let mut inverse = Array2::<Complex64>::eye(n);

    for column in 0..n {
        let mut pivot = column;
        for row in column + 1..n {
            if work[(row, column)].norm() > work[(pivot, column)].norm() {
                pivot = row;
            }
        }
        if work[(pivot, column)].norm() < 1e-12 * scale {
            return None;
        }
        if pivot != column {
            for k in 0..n {
                work.swap((column, k), (pivot, k));
                inverse.swap((column, k), (pivot, k));
            }
        }

        let divisor = work[(column, column)];
        for k in 0..n {
            work[(column, k)] /= divisor;
            inverse[(column, k)] /= divisor;
        }
        for row in 0..n {
            if row == column {
                continue;
            }
            let multiplier = work[(row, column)];
            if multiplier.norm() == 0.0 {
                continue;
            }
            for k in 0..n {
                let pivot_work = work[(column, k)];
                let pivot_inverse = inverse[(column, k)];
                work[(row, k)] -= pivot_work * multiplier;
                inverse[(row, k)] -= pivot_inverse * multiplier;
            }
        }
    }
    Some(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::DoaParameters;
    use crate::math::eigen::HermitianEigenSolver;
    use crate::simulation::covariance::CovarianceEstimator;
    use crate::simulation::snapshot::SignalSimulator;
    use ndarray::array;

    fn signal_subspace_for(params: &DoaParameters) -> Array2<Complex64> {
        let snapshots = SignalSimulator::simulate(params).unwrap();
        let covariance = CovarianceEstimator::estimate(&snapshots).unwrap();
        let decomposition = HermitianEigenSolver::decompose(&covariance).unwrap();
        decomposition.split(params.num_sources()).unwrap().signal
    }

    #[test]
    fn invert_recovers_the_identity() {
        let m = array![
            [Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(3.0, 0.0)],
        ];
        let inverse = invert(&m).unwrap();
        let product = m.dot(&inverse);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[(i, j)] - Complex64::new(expected, 0.0)).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn singular_matrix_is_not_invertible() {
        let m = array![
            [Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
            [Complex64::new(2.0, 0.0), Complex64::new(4.0, 0.0)],
        ];
        assert!(invert(&m).is_none());
    }

    #[test]
    fn characteristic_polynomial_of_diagonal_matrix() {
        // eigenvalues 1 and 2 -> z^2 - 3z + 2
        let m = array![
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(2.0, 0.0)],
        ];
        let coefficients = characteristic_polynomial(&m);
        assert!((coefficients[0] - Complex64::new(2.0, 0.0)).norm() < 1e-12);
        assert!((coefficients[1] - Complex64::new(-3.0, 0.0)).norm() < 1e-12);
        assert!((coefficients[2] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn high_snr_sources_are_recovered() {
        let params = DoaParameters {
            snapshots: 300,
            array_elements: 8,
            snr_db: 40.0,
            source_angles: vec![20.0, 60.0],
            seed: 13,
            ..Default::default()
        };
        let signal = signal_subspace_for(&params);
        let estimate = EspritEstimator::estimate(&signal, params.array_spacing).unwrap();
        assert_eq!(estimate.angles_deg.len(), 2);
        assert!(!estimate.shortfall);
        assert!((estimate.angles_deg[0] - 20.0).abs() < 1.0);
        assert!((estimate.angles_deg[1] - 60.0).abs() < 1.0);
    }

    #[test]
    fn minimum_aperture_margin_still_resolves() {
        // three sources on four elements: the smallest legal margin
        let params = DoaParameters {
            snapshots: 400,
            array_elements: 4,
            snr_db: 40.0,
            source_angles: vec![-40.0, 10.0, 55.0],
            seed: 29,
            ..Default::default()
        };
        let signal = signal_subspace_for(&params);
        let estimate = EspritEstimator::estimate(&signal, params.array_spacing).unwrap();
        assert_eq!(estimate.angles_deg.len(), 3);
    }
}
