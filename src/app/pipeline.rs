//! Shared fit pipeline used by the `invert` and `evaluate` commands.
//!
//! image -> gray -> row profile -> samples -> fit -> monotone repair -> inverse
//!
//! The command handlers in `app` only deal with presentation and files.

use std::path::Path;

use ::image::GrayImage;

use crate::domain::{FitConfig, GrayMethod, LutFile, Sample, full_domain};
use crate::error::AppResult;
use crate::fit::filter::samples_from_levels;
use crate::fit::fitter::{FitOptions, FitOutput, fit_samples};
use crate::fit::inverse::{InverseTable, invert};
use crate::fit::monotone::{MonotoneOutput, enforce_monotone};
use crate::fit::selection::{Evaluation, evaluate_variants};
use crate::io::image::load_gray8;
use crate::io::lut::apply_lut;
use crate::io::profile::{Profile, reference_levels, sample_profile};
use crate::models::SplineOptions;

/// All computed outputs of a single `gsdf invert` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub domain: Vec<u8>,
    pub profile: Profile,
    pub samples: Vec<Sample>,
    pub fit: FitOutput,
    pub monotone: MonotoneOutput,
    pub inverse: InverseTable,
    pub lut: LutFile,
    /// The same row after correcting the image through `lut`.
    pub corrected_profile: Profile,
}

/// Measured patches of one row, paired with their nominal levels.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub gray: GrayImage,
    pub profile: Profile,
    pub samples: Vec<Sample>,
}

pub fn measure(path: &Path, gray_method: GrayMethod, row: isize, breakpoints: usize) -> AppResult<Measurement> {
    let gray = load_gray8(path, gray_method)?;
    measure_gray(gray, row, breakpoints, false)
}

/// Sample `breakpoints` patches on `row`; `reversed` reads the row right to left.
pub fn measure_gray(gray: GrayImage, row: isize, breakpoints: usize, reversed: bool) -> AppResult<Measurement> {
    let mut profile = sample_profile(&gray, row, breakpoints)?;
    if reversed {
        profile = profile.reversed();
    }
    let reference = reference_levels(breakpoints)?;
    let samples = samples_from_levels(&reference, &profile.levels)?;

    tracing::debug!(
        row = profile.row,
        reversed,
        levels = ?profile.levels,
        "profile sampled"
    );

    Ok(Measurement {
        gray,
        profile,
        samples,
    })
}

fn fit_options(config: &FitConfig) -> FitOptions {
    FitOptions {
        skip_clipped: config.skip_clipped,
        spline: SplineOptions {
            smoothing: config.spline_smoothing,
        },
    }
}

/// Execute the full inversion pipeline.
pub fn run_invert(config: &FitConfig) -> AppResult<RunOutput> {
    let measurement = measure(&config.image_path, config.gray_method, config.row, config.breakpoints)?;
    run_invert_on(config, measurement)
}

/// Inversion on an already-sampled image.
pub fn run_invert_on(config: &FitConfig, measurement: Measurement) -> AppResult<RunOutput> {
    let domain = full_domain();
    let fit = fit_samples(&measurement.samples, &domain, config.method, &fit_options(config))?;
    let monotone = enforce_monotone(&fit.table);
    let inverse = invert(&domain, &fit.model)?;

    let lut = LutFile::from_inverse(&inverse, config.method, config.skip_clipped, Some(config.gray_method));
    let corrected = apply_lut(&measurement.gray, &lut.lookup()?);
    let corrected_profile = sample_profile(&corrected, measurement.profile.row as isize, config.breakpoints)?;

    Ok(RunOutput {
        domain,
        profile: measurement.profile,
        samples: measurement.samples,
        fit,
        monotone,
        inverse,
        lut,
        corrected_profile,
    })
}

/// Evaluations of the configured row and, optionally, the bottom row read reversed.
#[derive(Debug, Clone)]
pub struct EvaluateOutput {
    pub top: Evaluation,
    pub bottom: Option<Evaluation>,
}

pub fn run_evaluate(config: &FitConfig, include_bottom: bool) -> AppResult<EvaluateOutput> {
    let gray = load_gray8(&config.image_path, config.gray_method)?;
    run_evaluate_on(config, gray, include_bottom)
}

pub fn run_evaluate_on(config: &FitConfig, gray: GrayImage, include_bottom: bool) -> AppResult<EvaluateOutput> {
    let domain = full_domain();
    let spline = fit_options(config).spline;

    let top = measure_gray(gray.clone(), config.row, config.breakpoints, false)?;
    let top = evaluate_variants(&top.samples, &domain, spline)?;

    let bottom = if include_bottom {
        let m = measure_gray(gray, -1, config.breakpoints, true)?;
        Some(evaluate_variants(&m.samples, &domain, spline)?)
    } else {
        None
    };

    Ok(EvaluateOutput { top, bottom })
}
