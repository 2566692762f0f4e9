use num_complex::Complex64;

const MAX_ITERATIONS: usize = 500;
const CONVERGENCE_TOLERANCE: f64 = 1e-12;
const COEFFICIENT_TRIM: f64 = 1e-12;

/// Simultaneous root finder for complex polynomials.
pub struct PolynomialSolver;

impl PolynomialSolver {
    /// All complex roots of `sum(coefficients[k] * z^k)` by Durand-Kerner
    /// iteration with deterministic starting points.
    ///
    /// Negligible leading coefficients are trimmed first so the effective
    /// degree is honest; a zero polynomial has no roots.
    pub fn roots(coefficients: &[Complex64]) -> Vec<Complex64> {
        let max_magnitude = coefficients
            .iter()
            .map(|value| value.norm())
            .fold(0.0_f64, f64::max);
        if max_magnitude == 0.0 {
            return Vec::new();
        }

        let mut length = coefficients.len();
        while length > 0 && coefficients[length - 1].norm() <= COEFFICIENT_TRIM * max_magnitude {
            length -= 1;
        }
        if length <= 1 {
            return Vec::new();
        }

        let degree = length - 1;
        let lead = coefficients[length - 1];
        let monic: Vec<Complex64> = coefficients[..length]
            .iter()
            .map(|value| value / lead)
            .collect();

        let seed = Complex64::new(0.4, 0.9);
        let mut roots: Vec<Complex64> = (0..degree)
            .map(|index| seed.powu(index as u32 + 1))
            .collect();

        for _ in 0..MAX_ITERATIONS {
            let mut worst_step = 0.0_f64;
            for i in 0..degree {
                let mut denominator = Complex64::new(1.0, 0.0);
                for j in 0..degree {
                    if j != i {
                        denominator *= roots[i] - roots[j];
                    }
                }
                if denominator.norm() < 1e-300 {
                    continue;
                }
                let step = evaluate(&monic, roots[i]) / denominator;
                roots[i] -= step;
                worst_step = worst_step.max(step.norm());
            }
            if worst_step < CONVERGENCE_TOLERANCE {
                break;
            }
        }
        roots
    }
}

fn evaluate(monic: &[Complex64], z: Complex64) -> Complex64 {
    let mut accumulator = Complex64::new(0.0, 0.0);
    for &coefficient in monic.iter().rev() {
        accumulator = accumulator * z + coefficient;
    }
    accumulator
}
