use ndarray::Array2;
use num_complex::Complex64;

pub struct StatsHelper;

impl StatsHelper {
    /// Average per-entry power |x|^2 of a complex matrix.
    pub fn mean_power(matrix: &Array2<Complex64>) -> f64 {
        if matrix.is_empty() {
            return 0.0;
        }
        matrix.iter().map(|value| value.norm_sqr()).sum::<f64>() / matrix.len() as f64
    }
}
