//! Dense square solves for the spline systems.
//!
//! Systems here are at most a few hundred unknowns, so a dense LU is simpler
//! than a banded solver and fast enough.

use nalgebra::{DMatrix, DVector};

/// Solve `a * x = b` for square `a`.
///
/// Returns `None` for singular systems or non-finite solutions.
pub fn solve_square(a: DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if !a.is_square() || a.nrows() != b.len() {
        return None;
    }
    let x = a.lu().solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[3.0, 5.0]);
        let x = solve_square(a, &b).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn singular_system_is_none() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0]);
        assert!(solve_square(a, &b).is_none());
    }
}
