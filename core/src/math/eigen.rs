use crate::prelude::{EigenDecomposition, EngineError, EngineResult, SubspaceSplit};
use ndarray::{s, Array2};
use num_complex::Complex64;
use std::cmp::Ordering;

const MAX_SWEEPS: usize = 64;
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Hermitian eigensolver based on cyclic complex Jacobi rotations.
pub struct HermitianEigenSolver;

impl HermitianEigenSolver {
    /// Diagonalize a Hermitian matrix, returning eigenvalues sorted
    /// descending (stable ties) with orthonormal eigenvector columns.
    pub fn decompose(matrix: &Array2<Complex64>) -> EngineResult<EigenDecomposition> {
        let n = matrix.nrows();
        if n == 0 || matrix.ncols() != n {
            return Err(EngineError::DimensionMismatch(format!(
                "eigensolver needs a square matrix, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let mut work = matrix.clone();
        let mut vectors = Array2::<Complex64>::eye(n);
        let scale = matrix
            .iter()
            .map(|value| value.norm())
            .fold(0.0_f64, f64::max)
            .max(1.0);

        for _ in 0..MAX_SWEEPS {
            if off_diagonal_norm(&work) <= OFF_DIAGONAL_TOLERANCE * scale {
                break;
            }
            for p in 0..n - 1 {
                for q in p + 1..n {
                    rotate(&mut work, &mut vectors, p, q, 1e-30 * scale);
                }
            }
        }

        let diagonal: Vec<f64> = (0..n).map(|i| work[(i, i)].re).collect();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            diagonal[j]
                .partial_cmp(&diagonal[i])
                .unwrap_or(Ordering::Equal)
        });

        let eigenvalues: Vec<f64> = order.iter().map(|&i| diagonal[i]).collect();
        let mut eigenvectors = Array2::<Complex64>::zeros((n, n));
        for (column, &source) in order.iter().enumerate() {
            eigenvectors
                .column_mut(column)
                .assign(&vectors.column(source));
        }

        Ok(EigenDecomposition {
            eigenvalues,
            eigenvectors,
        })
    }
}

impl EigenDecomposition {
    /// Partition into signal (top `num_sources`) and noise subspaces.
    pub fn split(&self, num_sources: usize) -> EngineResult<SubspaceSplit> {
        let n = self.eigenvectors.nrows();
        if num_sources == 0 || num_sources >= n {
            return Err(EngineError::InsufficientRank(format!(
                "{} sources cannot be resolved with {} elements",
                num_sources, n
            )));
        }
        Ok(SubspaceSplit {
            signal: self.eigenvectors.slice(s![.., ..num_sources]).to_owned(),
            noise: self.eigenvectors.slice(s![.., num_sources..]).to_owned(),
        })
    }
}

fn off_diagonal_norm(matrix: &Array2<Complex64>) -> f64 {
    let n = matrix.nrows();
    let mut sum = 0.0;
    for p in 0..n {
        for q in 0..n {
            if p != q {
                sum += matrix[(p, q)].norm_sqr();
            }
        }
    }
    sum.sqrt()
}

/// One unitary Jacobi rotation annihilating the (p, q) off-diagonal pair.
///
/// The rotation is the complex analogue of the classical real Jacobi step:
/// the off-diagonal phase is absorbed first, then the remaining real 2x2
/// problem fixes the rotation angle.
fn rotate(
    work: &mut Array2<Complex64>,
    vectors: &mut Array2<Complex64>,
    p: usize,
    q: usize,
    threshold: f64,
) {
    let apq = work[(p, q)];
    let magnitude = apq.norm();
    if magnitude <= threshold {
        return;
    }

    let phase = Complex64::from_polar(1.0, apq.arg());
    let conj_phase = phase.conj();
    let tau = (work[(q, q)].re - work[(p, p)].re) / (2.0 * magnitude);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = t * c;

    let n = work.nrows();
    for k in 0..n {
        let akp = work[(k, p)];
        let akq = work[(k, q)];
        work[(k, p)] = akp * c - akq * conj_phase * s;
        work[(k, q)] = akp * s + akq * conj_phase * c;
    }
    for k in 0..n {
        let apk = work[(p, k)];
        let aqk = work[(q, k)];
        work[(p, k)] = apk * c - aqk * phase * s;
        work[(q, k)] = apk * s + aqk * phase * c;
    }
    work[(p, q)] = Complex64::new(0.0, 0.0);
    work[(q, p)] = Complex64::new(0.0, 0.0);
    work[(p, p)] = Complex64::new(work[(p, p)].re, 0.0);
    work[(q, q)] = Complex64::new(work[(q, q)].re, 0.0);

    for k in 0..n {
        let vkp = vectors[(k, p)];
        let vkq = vectors[(k, q)];
        vectors[(k, p)] = vkp * c - vkq * conj_phase * s;
        vectors[(k, q)] = vkp * s + vkq * conj_phase * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::complex_mat::MatrixHelper;
    use ndarray::array;

    fn hermitian_2x2() -> Array2<Complex64> {
        array![
            [Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0)],
            [Complex64::new(0.0, -1.0), Complex64::new(2.0, 0.0)],
        ]
    }

    #[test]
    fn known_hermitian_matrix_gives_analytic_eigenvalues() {
        let decomposition = HermitianEigenSolver::decompose(&hermitian_2x2()).unwrap();
        assert!((decomposition.eigenvalues[0] - 3.0).abs() < 1e-9);
        assert!((decomposition.eigenvalues[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn eigenvalues_are_sorted_descending() {
        let diagonal = array![
            [
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0)
            ],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(5.0, 0.0),
                Complex64::new(0.0, 0.0)
            ],
            [
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(3.0, 0.0)
            ],
        ];
        let decomposition = HermitianEigenSolver::decompose(&diagonal).unwrap();
        assert_eq!(decomposition.eigenvalues, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn eigenvectors_are_orthonormal_and_satisfy_eigen_equation() {
        let matrix = hermitian_2x2();
        let decomposition = HermitianEigenSolver::decompose(&matrix).unwrap();

        let v = &decomposition.eigenvectors;
        let gram = MatrixHelper::multiply(&MatrixHelper::hermitian(v), v).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((gram[(i, j)].re - expected).abs() < 1e-9);
                assert!(gram[(i, j)].im.abs() < 1e-9);
            }
        }

        for (index, &lambda) in decomposition.eigenvalues.iter().enumerate() {
            let vector = v.column(index);
            for row in 0..2 {
                let product: Complex64 = (0..2).map(|k| matrix[(row, k)] * vector[k]).sum();
                let scaled = vector[row] * lambda;
                assert!((product - scaled).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn split_partitions_signal_and_noise_columns() {
        let decomposition = HermitianEigenSolver::decompose(&hermitian_2x2()).unwrap();
        let split = decomposition.split(1).unwrap();
        assert_eq!(split.signal.ncols(), 1);
        assert_eq!(split.noise.ncols(), 1);
    }

    #[test]
    fn split_rejects_source_count_at_or_above_rank() {
        let decomposition = HermitianEigenSolver::decompose(&hermitian_2x2()).unwrap();
        assert!(matches!(
            decomposition.split(2),
            Err(EngineError::InsufficientRank(_))
        ));
    }
}
