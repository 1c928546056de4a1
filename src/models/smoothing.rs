//! Smoothing cubic spline (Reinsch formulation).
//!
//! Among all twice-differentiable curves whose squared residuals on the samples
//! sum to at most `S`, pick the one with the least bending energy `∫ f''(x)^2`.
//! Equivalently, minimize
//!
//! ```text
//! Σ (y_i - g_i)^2 + α ∫ f''(x)^2 dx
//! ```
//!
//! for the `α` at which the residual sum equals `S`. For fixed `α` the
//! solution is a natural cubic spline with knots at the samples:
//!
//! ```text
//! (R + α QᵀQ) γ = Qᵀ y        g = y - α Q γ
//! ```
//!
//! where `γ` are the interior second derivatives, `Q` is the `n × (n-2)`
//! second-difference matrix and `R` the `(n-2) × (n-2)` tridiagonal Gram matrix.
//!
//! Boundary behaviour of the residual budget:
//! - `S = 0` interpolates every sample (natural spline).
//! - `S` at or above the straight-line residual yields the least-squares line.

use nalgebra::{DMatrix, DVector};

use crate::domain::Sample;
use crate::error::{AppError, AppResult};
use crate::math::{RootOptions, brent, solve_square};
use crate::models::spline::{sorted_knots, spacings};
use crate::models::{CubicPieces, ResponseModel};

/// Minimum distinct reference levels for a cubic smoothing spline.
pub const SPLINE_MIN_SAMPLES: usize = 4;

/// Search range for `log10(α)`. Knot spacing is at most 255 levels, so the
/// penalty dominates (`α · QᵀQ ≫ R`) well before the upper end.
const LOG_ALPHA_MIN: f64 = -8.0;
const LOG_ALPHA_MAX: f64 = 20.0;

/// Tuning for [`SmoothingSpline::fit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SplineOptions {
    /// Residual budget `S`. `None` uses the sample count.
    pub smoothing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSpline {
    pieces: CubicPieces,
    smoothing: f64,
    residual: f64,
}

impl SmoothingSpline {
    pub fn fit(samples: &[Sample], opts: SplineOptions) -> AppResult<Self> {
        let (xs, ys) = sorted_knots(samples, SPLINE_MIN_SAMPLES)?;
        let smoothing = opts.smoothing.unwrap_or(xs.len() as f64);
        if !smoothing.is_finite() || smoothing < 0.0 {
            return Err(AppError::invalid(format!(
                "Smoothing factor must be finite and >= 0, got {smoothing}"
            )));
        }

        let system = PenalizedSystem::new(&xs, &ys);

        let alpha = if smoothing == 0.0 {
            0.0
        } else {
            let at_max = system.solve(10f64.powf(LOG_ALPHA_MAX))?;
            if at_max.residual <= smoothing {
                10f64.powf(LOG_ALPHA_MAX)
            } else {
                // RSS(α) rises monotonically from 0, so there is exactly one crossing.
                let log_alpha = brent(
                    |t| {
                        system
                            .solve(10f64.powf(t))
                            .map(|fit| fit.residual - smoothing)
                            .unwrap_or(f64::NAN)
                    },
                    LOG_ALPHA_MIN,
                    LOG_ALPHA_MAX,
                    RootOptions::default(),
                )?;
                10f64.powf(log_alpha)
            }
        };

        let fit = system.solve(alpha)?;
        tracing::debug!(alpha, smoothing, residual = fit.residual, "smoothing spline fitted");

        Ok(Self {
            pieces: CubicPieces::new(xs, fit.values, fit.second_derivatives),
            smoothing,
            residual: fit.residual,
        })
    }

    /// Residual budget the fit was asked for.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Achieved sum of squared residuals on the samples.
    pub fn residual(&self) -> f64 {
        self.residual
    }
}

impl ResponseModel for SmoothingSpline {
    fn evaluate(&self, x: f64) -> f64 {
        self.pieces.evaluate(x)
    }
}

struct PenalizedFit {
    values: Vec<f64>,
    second_derivatives: Vec<f64>,
    residual: f64,
}

struct PenalizedSystem {
    q: DMatrix<f64>,
    r: DMatrix<f64>,
    qtq: DMatrix<f64>,
    qty: DVector<f64>,
    y: DVector<f64>,
}

impl PenalizedSystem {
    fn new(xs: &[f64], ys: &[f64]) -> Self {
        let n = xs.len();
        let h = spacings(xs);
        let inner = n - 2;

        let mut q = DMatrix::<f64>::zeros(n, inner);
        let mut r = DMatrix::<f64>::zeros(inner, inner);
        for j in 1..n - 1 {
            let c = j - 1;
            q[(j - 1, c)] = 1.0 / h[j - 1];
            q[(j, c)] = -1.0 / h[j - 1] - 1.0 / h[j];
            q[(j + 1, c)] = 1.0 / h[j];

            r[(c, c)] = (h[j - 1] + h[j]) / 3.0;
            if c + 1 < inner {
                r[(c, c + 1)] = h[j] / 6.0;
                r[(c + 1, c)] = h[j] / 6.0;
            }
        }

        let y = DVector::from_column_slice(ys);
        let qtq = q.transpose() * &q;
        let qty = q.transpose() * &y;
        Self { q, r, qtq, qty, y }
    }

    fn solve(&self, alpha: f64) -> AppResult<PenalizedFit> {
        let lhs = &self.r + &self.qtq * alpha;
        let gamma = solve_square(lhs, &self.qty)
            .ok_or_else(|| AppError::degenerate(format!("Smoothing system is singular at alpha={alpha}")))?;

        let correction = &self.q * &gamma * alpha;
        let g = &self.y - &correction;
        let residual = correction.norm_squared();

        let mut m = Vec::with_capacity(self.y.len());
        m.push(0.0);
        m.extend(gamma.iter().copied());
        m.push(0.0);

        Ok(PenalizedFit {
            values: g.iter().copied().collect(),
            second_derivatives: m,
            residual,
        })
    }
}
