//! Least squares polynomial fitting.
//!
//! The linear response model is an ordinary least squares fit of
//!
//! ```text
//! y ≈ c_0 x^d + c_1 x^(d-1) + ... + c_d
//! ```
//!
//! Implementation choices:
//! - We build the Vandermonde design matrix and solve it with SVD, which also
//!   handles tall systems (more samples than coefficients).
//! - Coefficients are returned highest power first so evaluation is plain Horner.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Least squares polynomial fit of the given degree.
///
/// Returns coefficients highest power first, or `None` when the system has
/// fewer rows than coefficients or cannot be solved.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    let n = xs.len();
    let cols = degree + 1;
    if n != ys.len() || n < cols {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, cols);
    for (i, &x) in xs.iter().enumerate() {
        let mut power = 1.0;
        for j in (0..cols).rev() {
            design[(i, j)] = power;
            power *= x;
        }
    }
    let rhs = DVector::from_column_slice(ys);

    let coeffs = solve_least_squares(&design, &rhs)?;
    Some(coeffs.iter().copied().collect())
}

/// Evaluate a polynomial (highest power first) with Horner's scheme.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn polyfit_line_is_highest_power_first() {
        let xs = [0.0, 50.0, 100.0, 200.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x + 10.0).collect();
        let c = polyfit(&xs, &ys, 1).unwrap();
        assert_eq!(c.len(), 2);
        assert!((c[0] - 0.5).abs() < 1e-9);
        assert!((c[1] - 10.0).abs() < 1e-9);
        assert!((polyval(&c, 120.0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn polyfit_rejects_underdetermined() {
        assert!(polyfit(&[1.0], &[2.0], 1).is_none());
        assert!(polyfit(&[1.0, 2.0], &[2.0], 1).is_none());
    }
}
