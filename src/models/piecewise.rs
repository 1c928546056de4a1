use crate::error::{AppError, AppResult};
use crate::models::ResponseModel;
use crate::models::spline::piece_index;

/// Straight segments between breakpoints.
///
/// Beyond the outermost breakpoints the first/last segment is extended.
/// A single breakpoint is a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PiecewiseLinear {
    pub fn new(xs: &[f64], ys: &[f64]) -> AppResult<Self> {
        if xs.len() != ys.len() {
            return Err(AppError::invalid(format!(
                "length is not matched for x ({}) and y ({})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(AppError::invalid("At least one breakpoint is required"));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::invalid("Breakpoints must be finite"));
        }

        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(AppError::invalid(format!("Duplicate breakpoint x={}", w[0].0)));
        }

        Ok(Self {
            xs: pairs.iter().map(|p| p.0).collect(),
            ys: pairs.iter().map(|p| p.1).collect(),
        })
    }
}

impl ResponseModel for PiecewiseLinear {
    fn evaluate(&self, x: f64) -> f64 {
        if self.xs.len() == 1 {
            return self.ys[0];
        }
        let i = piece_index(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_and_extrapolates() {
        let pl = PiecewiseLinear::new(&[10.0, 0.0, 20.0], &[100.0, 0.0, 120.0]).unwrap();
        assert_eq!(pl.evaluate(5.0), 50.0);
        assert_eq!(pl.evaluate(15.0), 110.0);
        assert_eq!(pl.evaluate(-1.0), -10.0);
        assert_eq!(pl.evaluate(30.0), 140.0);
    }

    #[test]
    fn single_breakpoint_is_constant() {
        let pl = PiecewiseLinear::new(&[42.0], &[7.0]).unwrap();
        assert_eq!(pl.evaluate(0.0), 7.0);
        assert_eq!(pl.evaluate(255.0), 7.0);
    }

    #[test]
    fn rejects_bad_breakpoints() {
        assert!(PiecewiseLinear::new(&[], &[]).is_err());
        assert!(PiecewiseLinear::new(&[1.0, 2.0], &[1.0]).is_err());
        assert!(PiecewiseLinear::new(&[1.0, 1.0], &[1.0, 2.0]).is_err());
    }
}
