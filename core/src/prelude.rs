use ndarray::Array2;
use num_complex::Complex64;

/// Common error type for engine computations.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("insufficient rank: {0}")]
    InsufficientRank(String),
    #[error("score mismatch: {0}")]
    ScoreMismatch(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Hermitian eigendecomposition with eigenvalues sorted descending.
///
/// Eigenvectors are stored as matrix columns in the same order as
/// `eigenvalues` and are mutually orthonormal.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Array2<Complex64>,
}

/// Signal/noise partition of an eigendecomposition.
#[derive(Debug, Clone)]
pub struct SubspaceSplit {
    /// Columns spanning the signal subspace (top `num_sources` eigenvectors).
    pub signal: Array2<Complex64>,
    /// Columns spanning the noise subspace (the remainder).
    pub noise: Array2<Complex64>,
}

/// Bearing estimate produced by a single estimator.
#[derive(Debug, Clone)]
pub struct AngleEstimate {
    /// Estimated bearings in degrees, ascending.
    pub angles_deg: Vec<f64>,
    /// True when fewer valid bearings than requested sources were found.
    pub shortfall: bool,
}
