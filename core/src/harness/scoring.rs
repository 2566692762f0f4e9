use crate::prelude::{EngineError, EngineResult};
use std::cmp::Ordering;

/// Worst-case bearing used to reconcile estimator shortfalls for scoring.
pub const BOUNDARY_PAD_DEG: f64 = 90.0;

/// Root-mean-square error between matched sorted estimate/truth pairs.
///
/// Length disagreement is an error, never a silent infinity; callers
/// reconcile shortfalls with [`pad_to_truth`] first.
pub fn rmse(estimated: &[f64], truth: &[f64]) -> EngineResult<f64> {
    if estimated.len() != truth.len() {
        return Err(EngineError::ScoreMismatch(format!(
            "{} estimates against {} true angles",
            estimated.len(),
            truth.len()
        )));
    }
    if estimated.is_empty() {
        return Err(EngineError::ScoreMismatch("no angles to score".into()));
    }

    let mut estimated = estimated.to_vec();
    let mut truth = truth.to_vec();
    estimated.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    truth.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let sum_squared: f64 = estimated
        .iter()
        .zip(&truth)
        .map(|(e, t)| (e - t) * (e - t))
        .sum();
    Ok((sum_squared / estimated.len() as f64).sqrt())
}

/// Reconcile a shortfall against the fixed truth length by padding with the
/// +90 degree boundary bearing.
pub fn pad_to_truth(estimated: &[f64], truth_len: usize) -> Vec<f64> {
    let mut padded = estimated.to_vec();
    while padded.len() < truth_len {
        padded.push(BOUNDARY_PAD_DEG);
    }
    padded.truncate(truth_len);
    padded
}
