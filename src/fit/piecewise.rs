//! Dense piecewise-linear reconstruction through breakpoints.
//!
//! Used as the "what the measurements literally say" baseline when comparing
//! fitted curves: straight lines between measured patches, one entry per
//! integer level across the breakpoint span.

use crate::domain::quantize_level;
use crate::error::{AppError, AppResult};
use crate::models::{PiecewiseLinear, ResponseModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// Every integer level from `min(xs)` to `max(xs)` inclusive.
    pub xs: Vec<u8>,
    pub ys: Vec<u8>,
}

pub fn reconstruct(xs: &[u8], ys: &[u8]) -> AppResult<Reconstruction> {
    if xs.len() != ys.len() {
        return Err(AppError::invalid(format!(
            "length is not matched for x ({}) and y ({})",
            xs.len(),
            ys.len()
        )));
    }
    let (Some(&lo), Some(&hi)) = (xs.iter().min(), xs.iter().max()) else {
        return Err(AppError::invalid("At least one breakpoint is required"));
    };

    let bx: Vec<f64> = xs.iter().map(|&x| x as f64).collect();
    let by: Vec<f64> = ys.iter().map(|&y| y as f64).collect();
    let line = PiecewiseLinear::new(&bx, &by)?;

    let dense_xs: Vec<u8> = (lo..=hi).collect();
    let dense_ys = dense_xs
        .iter()
        .map(|&x| quantize_level(line.evaluate(x as f64)))
        .collect();

    Ok(Reconstruction {
        xs: dense_xs,
        ys: dense_ys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_breakpoints_give_a_straight_ramp() {
        let r = reconstruct(&[0, 10], &[0, 100]).unwrap();
        assert_eq!(r.xs, (0..=10).collect::<Vec<u8>>());
        assert_eq!(r.ys[0], 0);
        assert_eq!(r.ys[10], 100);
        for w in r.ys.windows(2) {
            assert_eq!(w[1] - w[0], 10);
        }
    }

    #[test]
    fn span_starts_at_smallest_breakpoint() {
        let r = reconstruct(&[200, 50, 100], &[250, 10, 128]).unwrap();
        assert_eq!(r.xs.first(), Some(&50));
        assert_eq!(r.xs.last(), Some(&200));
        assert_eq!(r.ys[0], 10);
        assert_eq!(r.ys[50], 128);
        assert_eq!(*r.ys.last().unwrap(), 250);
        // Halfway between (50,10) and (100,128): 69 exactly.
        assert_eq!(r.ys[25], 69);
    }

    #[test]
    fn single_breakpoint() {
        let r = reconstruct(&[42], &[7]).unwrap();
        assert_eq!(r.xs, vec![42]);
        assert_eq!(r.ys, vec![7]);
    }

    #[test]
    fn rejects_mismatched_or_empty() {
        assert!(matches!(reconstruct(&[1, 2], &[3]), Err(AppError::InvalidInput(_))));
        assert!(matches!(reconstruct(&[], &[]), Err(AppError::InvalidInput(_))));
    }
}
