use crate::prelude::{EngineError, EngineResult};
use ndarray::Array2;
use num_complex::Complex64;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two complex matrices, checking the inner dimension.
    pub fn multiply(
        lhs: &Array2<Complex64>,
        rhs: &Array2<Complex64>,
    ) -> EngineResult<Array2<Complex64>> {
        if lhs.ncols() != rhs.nrows() {
            return Err(EngineError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                lhs.nrows(),
                lhs.ncols(),
                rhs.nrows(),
                rhs.ncols()
            )));
        }
        Ok(lhs.dot(rhs))
    }

    /// Conjugate transpose (Hermitian adjoint).
    pub fn hermitian(matrix: &Array2<Complex64>) -> Array2<Complex64> {
        matrix.t().mapv(|value| value.conj())
    }

    pub fn identity(size: usize) -> Array2<Complex64> {
        Array2::eye(size)
    }
}
