//! Interpolating cubic spline with not-a-knot end conditions.
//!
//! The curve passes exactly through every sample. Instead of forcing zero
//! curvature at the ends (natural spline), the third derivative is continuous
//! across the second and second-to-last knots, so four or more samples taken
//! from any cubic polynomial reproduce that polynomial exactly. Inputs outside
//! the sampled range are extrapolated with the end pieces.

use nalgebra::{DMatrix, DVector};

use crate::domain::Sample;
use crate::error::{AppError, AppResult};
use crate::math::solve_square;
use crate::models::spline::{sorted_knots, spacings};
use crate::models::{CubicPieces, ResponseModel};

/// Minimum distinct reference levels for a not-a-knot cubic.
pub const CUBIC_MIN_SAMPLES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct CubicInterpolant {
    pieces: CubicPieces,
}

impl CubicInterpolant {
    pub fn fit(samples: &[Sample]) -> AppResult<Self> {
        let (xs, ys) = sorted_knots(samples, CUBIC_MIN_SAMPLES)?;
        let n = xs.len();
        let h = spacings(&xs);

        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);

        // Not-a-knot at x_1: third derivative continuous across the knot.
        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];

        for i in 1..n - 1 {
            a[(i, i - 1)] = h[i - 1];
            a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            a[(i, i + 1)] = h[i];
            rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        }

        // Not-a-knot at x_{n-2}.
        a[(n - 1, n - 3)] = h[n - 2];
        a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
        a[(n - 1, n - 1)] = h[n - 3];

        let m = solve_square(a, &rhs)
            .ok_or_else(|| AppError::degenerate("Cubic interpolation system is singular"))?;

        Ok(Self {
            pieces: CubicPieces::new(xs, ys, m.iter().copied().collect()),
        })
    }
}

impl ResponseModel for CubicInterpolant {
    fn evaluate(&self, x: f64) -> f64 {
        self.pieces.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_of(f: fn(f64) -> f64, refs: &[u8]) -> Vec<Sample> {
        refs.iter()
            .map(|&r| Sample::new(r, f(r as f64).round() as u8))
            .collect()
    }

    #[test]
    fn passes_through_every_sample() {
        let samples = vec![
            Sample::new(0, 3),
            Sample::new(17, 9),
            Sample::new(34, 30),
            Sample::new(51, 41),
            Sample::new(68, 80),
            Sample::new(85, 95),
        ];
        let model = CubicInterpolant::fit(&samples).unwrap();
        for s in &samples {
            let y = model.evaluate(s.reference as f64);
            assert!((y - s.measured as f64).abs() < 1e-9, "S({}) = {y}", s.reference);
        }
    }

    #[test]
    fn reproduces_a_cubic_including_extrapolation() {
        // x^3 / 1000 is integer-valued on these references: 0, 1, 8, 27, 64, 125.
        let exact = |x: f64| x * x * x / 1000.0;
        let samples = samples_of(exact, &[0, 10, 20, 30, 40, 50]);
        let model = CubicInterpolant::fit(&samples).unwrap();
        for x in [5.0, 25.0, 45.0, 55.0, 60.0] {
            assert!((model.evaluate(x) - exact(x)).abs() < 1e-7, "x={x}");
        }
    }

    #[test]
    fn sample_order_does_not_matter() {
        let a = vec![
            Sample::new(0, 0),
            Sample::new(85, 60),
            Sample::new(170, 150),
            Sample::new(255, 255),
        ];
        let mut b = a.clone();
        b.reverse();
        let ma = CubicInterpolant::fit(&a).unwrap();
        let mb = CubicInterpolant::fit(&b).unwrap();
        for x in [0.0, 40.0, 128.0, 240.0] {
            assert!((ma.evaluate(x) - mb.evaluate(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn needs_four_samples() {
        let samples = [Sample::new(0, 0), Sample::new(100, 90), Sample::new(255, 250)];
        assert!(matches!(
            CubicInterpolant::fit(&samples),
            Err(AppError::InvalidInput(_))
        ));
    }
}
