use crate::math::complex_mat::MatrixHelper;
use crate::prelude::{EngineError, EngineResult};
use ndarray::Array2;
use num_complex::Complex64;

/// Sample spatial covariance estimation.
pub struct CovarianceEstimator;

impl CovarianceEstimator {
    /// `R = X * X^H / snapshots`, numerically symmetrized so the
    /// eigensolver always sees an exactly Hermitian matrix.
    pub fn estimate(snapshots: &Array2<Complex64>) -> EngineResult<Array2<Complex64>> {
        let count = snapshots.ncols();
        if count == 0 {
            return Err(EngineError::DimensionMismatch(
                "snapshot matrix has no columns".into(),
            ));
        }

        let adjoint = MatrixHelper::hermitian(snapshots);
        let mut covariance = MatrixHelper::multiply(snapshots, &adjoint)?;
        let scale = 1.0 / count as f64;
        covariance.mapv_inplace(|value| value * scale);

        let mirrored = MatrixHelper::hermitian(&covariance);
        covariance.zip_mut_with(&mirrored, |value, other| *value = (*value + *other) * 0.5);
        Ok(covariance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn single_snapshot_covariance_matches_outer_product() {
        let x = array![[Complex64::new(1.0, 0.0)], [Complex64::new(0.0, 1.0)]];
        let covariance = CovarianceEstimator::estimate(&x).unwrap();
        assert!((covariance[(0, 0)] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((covariance[(0, 1)] - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((covariance[(1, 0)] - Complex64::new(0.0, 1.0)).norm() < 1e-12);
        assert!((covariance[(1, 1)] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn covariance_is_hermitian_with_real_diagonal() {
        let x = array![
            [Complex64::new(1.0, 2.0), Complex64::new(-0.5, 0.3)],
            [Complex64::new(0.0, -1.0), Complex64::new(2.0, 0.1)],
            [Complex64::new(0.7, 0.7), Complex64::new(1.0, -1.0)],
        ];
        let covariance = CovarianceEstimator::estimate(&x).unwrap();
        for i in 0..3 {
            assert!(covariance[(i, i)].im.abs() < 1e-12);
            assert!(covariance[(i, i)].re >= 0.0);
            for j in 0..3 {
                let mirrored = covariance[(j, i)].conj();
                assert!((covariance[(i, j)] - mirrored).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn empty_snapshot_matrix_is_rejected() {
        let x = Array2::<Complex64>::zeros((3, 0));
        assert!(CovarianceEstimator::estimate(&x).is_err());
    }
}
