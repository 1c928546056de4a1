//! Response curve fitting.
//!
//! Given:
//! - reference levels (what the test image should show)
//! - measured levels (what was sampled back)
//! - an evaluation domain (usually every 8-bit level)
//! - a regression family
//!
//! we fit a continuous response model and evaluate it over the domain. The
//! model is kept unrounded for inversion; the evaluated table is rounded half
//! to even and saturated into `[0, 255]`.

use crate::domain::{FitMethod, Sample, quantize_level};
use crate::error::AppResult;
use crate::fit::filter::{filter_samples, samples_from_levels};
use crate::models::{
    CubicInterpolant, FittedModel, Polynomial, ResponseModel, SmoothingSpline, SplineOptions,
};

/// Fitting options that affect how each model is calibrated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitOptions {
    /// Drop samples measured at 0 or 255 before fitting.
    pub skip_clipped: bool,
    /// Smoothing-spline tuning (ignored by the other methods).
    pub spline: SplineOptions,
}

/// A fitted model plus its quantized evaluation.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub model: FittedModel,
    /// `table[i]` is the rounded model value at `domain[i]`.
    pub table: Vec<u8>,
    /// Samples the model was actually fitted to (after filtering).
    pub samples: Vec<Sample>,
}

/// Fit reference/measured level pairs with the given method.
pub fn fit(
    reference: &[u8],
    measured: &[u8],
    domain: &[u8],
    method: FitMethod,
    opts: &FitOptions,
) -> AppResult<FitOutput> {
    let samples = samples_from_levels(reference, measured)?;
    fit_samples(&samples, domain, method, opts)
}

/// Same as [`fit`], with the method given by name (`linear`, `cubic`, `spline`).
pub fn fit_by_name(
    reference: &[u8],
    measured: &[u8],
    domain: &[u8],
    method: &str,
    opts: &FitOptions,
) -> AppResult<FitOutput> {
    let samples = samples_from_levels(reference, measured)?;
    let method: FitMethod = method.parse()?;
    fit_samples(&samples, domain, method, opts)
}

/// Fit already-paired samples.
pub fn fit_samples(
    samples: &[Sample],
    domain: &[u8],
    method: FitMethod,
    opts: &FitOptions,
) -> AppResult<FitOutput> {
    let samples = filter_samples(samples, opts.skip_clipped);
    let model = fit_model(&samples, method, opts)?;
    let table = evaluate_table(&model, domain);

    tracing::debug!(
        %method,
        skip_clipped = opts.skip_clipped,
        n = samples.len(),
        "response model fitted"
    );

    Ok(FitOutput {
        model,
        table,
        samples,
    })
}

fn fit_model(samples: &[Sample], method: FitMethod, opts: &FitOptions) -> AppResult<FittedModel> {
    match method {
        FitMethod::Linear => {
            let xs: Vec<f64> = samples.iter().map(|s| s.reference as f64).collect();
            let ys: Vec<f64> = samples.iter().map(|s| s.measured as f64).collect();
            Ok(FittedModel::Linear(Polynomial::fit(&xs, &ys, 1)?))
        }
        FitMethod::Cubic => Ok(FittedModel::Cubic(CubicInterpolant::fit(samples)?)),
        FitMethod::Spline => Ok(FittedModel::Spline(SmoothingSpline::fit(samples, opts.spline)?)),
    }
}

/// Evaluate any response model over a domain and quantize to 8-bit levels.
pub fn evaluate_table<M: ResponseModel + ?Sized>(model: &M, domain: &[u8]) -> Vec<u8> {
    domain
        .iter()
        .map(|&x| quantize_level(model.evaluate(x as f64)))
        .collect()
}
