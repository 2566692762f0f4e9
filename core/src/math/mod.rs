pub mod complex_mat;
pub mod eigen;
pub mod poly;
pub mod stats;

pub use complex_mat::MatrixHelper;
pub use eigen::HermitianEigenSolver;
pub use poly::PolynomialSolver;
pub use stats::StatsHelper;
