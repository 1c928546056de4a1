//! The response model capability and the closed set of fitted variants.
//!
//! Downstream code (table evaluation, inversion, plotting) only ever needs
//! `evaluate(x) -> y`, so that is the whole trait. `FittedModel` is what the
//! curve fitter hands out; it dispatches to whichever form was fitted.

use crate::domain::FitMethod;
use crate::models::{CubicInterpolant, Polynomial, SmoothingSpline};

/// A continuous display response: input level in, output level out.
///
/// Implementations must be pure. They are shared across threads during
/// inversion.
pub trait ResponseModel: Send + Sync {
    fn evaluate(&self, x: f64) -> f64;
}

/// Adapter that lets a plain closure act as a response model.
#[derive(Debug, Clone, Copy)]
pub struct FnModel<F>(pub F);

impl<F> ResponseModel for FnModel<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}

/// A model produced by the curve fitter.
#[derive(Debug, Clone)]
pub enum FittedModel {
    Linear(Polynomial),
    Cubic(CubicInterpolant),
    Spline(SmoothingSpline),
}

impl FittedModel {
    pub fn method(&self) -> FitMethod {
        match self {
            FittedModel::Linear(_) => FitMethod::Linear,
            FittedModel::Cubic(_) => FitMethod::Cubic,
            FittedModel::Spline(_) => FitMethod::Spline,
        }
    }
}

impl ResponseModel for FittedModel {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            FittedModel::Linear(m) => m.evaluate(x),
            FittedModel::Cubic(m) => m.evaluate(x),
            FittedModel::Spline(m) => m.evaluate(x),
        }
    }
}
