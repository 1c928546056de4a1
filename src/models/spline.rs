//! Piecewise cubic curves stored as knot values plus second derivatives.
//!
//! On `[x_i, x_{i+1}]` with `h = x_{i+1} - x_i`:
//!
//! ```text
//! S(x) = M_i (x_{i+1} - x)^3 / 6h + M_{i+1} (x - x_i)^3 / 6h
//!      + (y_i / h - M_i h / 6) (x_{i+1} - x)
//!      + (y_{i+1} / h - M_{i+1} h / 6) (x - x_i)
//! ```
//!
//! Outside the knot range the first/last piece is extended, so evaluation
//! never fails.

use crate::domain::Sample;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CubicPieces {
    xs: Vec<f64>,
    ys: Vec<f64>,
    m: Vec<f64>,
}

impl CubicPieces {
    /// Build from knots, values and second derivatives (all the same length, ≥2).
    pub(crate) fn new(xs: Vec<f64>, ys: Vec<f64>, m: Vec<f64>) -> Self {
        debug_assert!(xs.len() >= 2 && xs.len() == ys.len() && ys.len() == m.len());
        Self { xs, ys, m }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let i = piece_index(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        self.m[i] * a * a * a / (6.0 * h)
            + self.m[i + 1] * b * b * b / (6.0 * h)
            + (self.ys[i] / h - self.m[i] * h / 6.0) * a
            + (self.ys[i + 1] / h - self.m[i + 1] * h / 6.0) * b
    }
}

/// Index of the piece used for `x`, clamped to the first/last piece.
pub(crate) fn piece_index(xs: &[f64], x: f64) -> usize {
    let last = xs.len() - 2;
    // First knot strictly greater than x, minus one.
    let upper = xs.partition_point(|&k| k <= x);
    upper.saturating_sub(1).min(last)
}

/// Sort samples by reference level and return knots and values.
///
/// Fails if fewer than `min_count` samples are given or if two samples share a
/// reference level.
pub(crate) fn sorted_knots(samples: &[Sample], min_count: usize) -> AppResult<(Vec<f64>, Vec<f64>)> {
    if samples.len() < min_count {
        return Err(AppError::invalid(format!(
            "At least {min_count} samples are required, got {}",
            samples.len()
        )));
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.reference);
    if let Some(pair) = sorted.windows(2).find(|w| w[0].reference == w[1].reference) {
        return Err(AppError::invalid(format!(
            "Duplicate reference level {} in samples",
            pair[0].reference
        )));
    }

    let xs = sorted.iter().map(|s| s.reference as f64).collect();
    let ys = sorted.iter().map(|s| s.measured as f64).collect();
    Ok((xs, ys))
}

/// Knot spacings `h_i = x_{i+1} - x_i`.
pub(crate) fn spacings(xs: &[f64]) -> Vec<f64> {
    xs.windows(2).map(|w| w[1] - w[0]).collect()
}
