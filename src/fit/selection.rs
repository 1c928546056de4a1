//! Fit-variant comparison.
//!
//! The tool fits every regression family both on all samples and on the
//! unclipped samples only (six variants), repairs each table to be
//! non-decreasing, and scores it two ways:
//!
//! - at the unclipped breakpoints only
//! - against the piecewise-linear reconstruction through those breakpoints
//!
//! Each score is the RMSE (and STD) of `table - reference`. The variant with
//! the smallest RMSE wins; ties go to the earlier (simpler) variant.

use crate::domain::{FitMethod, Sample};
use crate::error::{AppError, AppResult};
use crate::fit::filter::filter_samples;
use crate::fit::fitter::{FitOptions, FitOutput, fit_samples};
use crate::fit::monotone::{MonotoneOutput, enforce_monotone};
use crate::fit::piecewise::{Reconstruction, reconstruct};
use crate::models::SplineOptions;
use crate::report::{ErrorStats, table_differences};

/// One regression family with or without clipped-sample filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub method: FitMethod,
    pub skip_clipped: bool,
}

impl Variant {
    /// All six variants, full fits first.
    pub fn all() -> Vec<Variant> {
        [false, true]
            .into_iter()
            .flat_map(|skip_clipped| {
                FitMethod::ALL.into_iter().map(move |method| Variant {
                    method,
                    skip_clipped,
                })
            })
            .collect()
    }

    pub fn label(&self) -> String {
        if self.skip_clipped {
            format!("Partial {}", self.method.name())
        } else {
            self.method.display_name().to_string()
        }
    }
}

/// A scored variant.
#[derive(Debug, Clone)]
pub struct VariantFit {
    pub variant: Variant,
    pub fit: FitOutput,
    pub monotone: MonotoneOutput,
    pub at_breakpoints: ErrorStats,
    pub vs_piecewise: ErrorStats,
}

/// Output of fitting + scoring every variant.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Unclipped samples used as the error reference.
    pub breakpoints: Vec<Sample>,
    /// Piecewise-linear curve through `breakpoints`.
    pub baseline: Reconstruction,
    pub fits: Vec<VariantFit>,
    /// Variants that could not be fitted and why (for diagnostics).
    pub skipped: Vec<(Variant, String)>,
    /// Index into `fits` with the lowest RMSE at the breakpoints.
    pub best_at_breakpoints: usize,
    /// Index into `fits` with the lowest RMSE against the baseline.
    pub best_vs_piecewise: usize,
}

pub fn evaluate_variants(samples: &[Sample], domain: &[u8], spline: SplineOptions) -> AppResult<Evaluation> {
    let breakpoints = filter_samples(samples, true);
    if breakpoints.is_empty() {
        return Err(AppError::invalid("Every sample is clipped; nothing to score against"));
    }
    let bx: Vec<u8> = breakpoints.iter().map(|s| s.reference).collect();
    let by: Vec<u8> = breakpoints.iter().map(|s| s.measured).collect();
    let baseline = reconstruct(&bx, &by)?;

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for variant in Variant::all() {
        let opts = FitOptions {
            skip_clipped: variant.skip_clipped,
            spline,
        };
        let fit = match fit_samples(samples, domain, variant.method, &opts) {
            Ok(fit) => fit,
            Err(err @ (AppError::InvalidInput(_) | AppError::NumericDegenerate(_))) => {
                tracing::info!(variant = %variant.label(), %err, "variant skipped");
                skipped.push((variant, err.to_string()));
                continue;
            }
            Err(err) => return Err(err),
        };
        let monotone = enforce_monotone(&fit.table);

        let at_breakpoints =
            ErrorStats::from_differences(&table_differences(&monotone.table, domain, &bx, &by)?);
        let vs_piecewise = ErrorStats::from_differences(&table_differences(
            &monotone.table,
            domain,
            &baseline.xs,
            &baseline.ys,
        )?);

        fits.push(VariantFit {
            variant,
            fit,
            monotone,
            at_breakpoints,
            vs_piecewise,
        });
    }

    if fits.is_empty() {
        return Err(AppError::invalid("Insufficient data to fit any variant."));
    }

    let best_at_breakpoints = argmin_rmse(&fits, |f| f.at_breakpoints.rmse);
    let best_vs_piecewise = argmin_rmse(&fits, |f| f.vs_piecewise.rmse);

    Ok(Evaluation {
        breakpoints,
        baseline,
        fits,
        skipped,
        best_at_breakpoints,
        best_vs_piecewise,
    })
}

/// Index of the minimum RMSE; ties keep the earlier variant.
fn argmin_rmse(fits: &[VariantFit], rmse: impl Fn(&VariantFit) -> f64) -> usize {
    let mut best = 0;
    for (i, f) in fits.iter().enumerate().skip(1) {
        if rmse(f) < rmse(&fits[best]) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{full_domain, quantize_level};
    use crate::fit::filter::samples_from_levels;

    fn gsdf_samples(gamma: f64, gain: f64) -> Vec<Sample> {
        let reference: Vec<u8> = (0..16).map(|i| (i * 17) as u8).collect();
        let measured: Vec<u8> = reference
            .iter()
            .map(|&r| quantize_level(255.0 * (r as f64 / 255.0).powf(gamma) * gain))
            .collect();
        samples_from_levels(&reference, &measured).unwrap()
    }

    #[test]
    fn six_variants_in_a_stable_order() {
        let v = Variant::all();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].label(), "Linear");
        assert_eq!(v[4].label(), "Partial cubic");
        assert!(v[3..].iter().all(|v| v.skip_clipped));
    }

    #[test]
    fn partial_cubic_is_exact_at_breakpoints() {
        let samples = gsdf_samples(0.8, 1.1);
        let eval = evaluate_variants(&samples, &full_domain(), SplineOptions::default()).unwrap();
        assert_eq!(eval.fits.len(), 6);
        assert!(eval.skipped.is_empty());

        let partial_cubic = eval
            .fits
            .iter()
            .find(|f| f.variant.method == FitMethod::Cubic && f.variant.skip_clipped)
            .unwrap();
        // Interpolates the unclipped samples; only monotone repair could move them.
        if partial_cubic.monotone.is_clean() {
            assert!(partial_cubic.at_breakpoints.rmse < 1e-12);
        }
        let best = &eval.fits[eval.best_at_breakpoints];
        assert!(best.at_breakpoints.rmse <= partial_cubic.at_breakpoints.rmse);
    }

    #[test]
    fn baseline_spans_the_unclipped_breakpoints() {
        let samples = gsdf_samples(0.8, 1.1);
        let eval = evaluate_variants(&samples, &full_domain(), SplineOptions::default()).unwrap();
        let lo = eval.breakpoints.iter().map(|s| s.reference).min().unwrap();
        let hi = eval.breakpoints.iter().map(|s| s.reference).max().unwrap();
        assert_eq!(eval.baseline.xs.first(), Some(&lo));
        assert_eq!(eval.baseline.xs.last(), Some(&hi));
        for f in &eval.fits {
            assert_eq!(f.vs_piecewise.n, eval.baseline.xs.len());
        }
    }

    #[test]
    fn too_few_samples_skip_curved_variants() {
        let samples = vec![Sample::new(0, 5), Sample::new(128, 120), Sample::new(255, 250)];
        let eval = evaluate_variants(&samples, &full_domain(), SplineOptions::default()).unwrap();
        // Only the two linear variants survive; cubic/spline need four samples.
        assert_eq!(eval.fits.len(), 2);
        assert_eq!(eval.skipped.len(), 4);
        assert!(eval.fits.iter().all(|f| f.variant.method == FitMethod::Linear));
    }

    #[test]
    fn all_clipped_is_invalid() {
        let samples = vec![Sample::new(0, 0), Sample::new(255, 255)];
        assert!(matches!(
            evaluate_variants(&samples, &full_domain(), SplineOptions::default()),
            Err(AppError::InvalidInput(_))
        ));
    }
}
