//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - used in-memory during fitting and inversion
//! - exported to JSON/CSV
//! - reloaded later for plotting or applying a correction

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Largest representable 8-bit level.
pub const MAX_LEVEL: u8 = u8::MAX;

/// Number of entries in a full 8-bit table.
pub const LEVEL_COUNT: usize = MAX_LEVEL as usize + 1;

/// One reference/measured brightness pair.
///
/// `reference` is the level the test image was supposed to show, `measured` is
/// what was sampled back from the captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sample {
    pub reference: u8,
    pub measured: u8,
}

impl Sample {
    pub fn new(reference: u8, measured: u8) -> Self {
        Self {
            reference,
            measured,
        }
    }

    /// A measured level at either representable extremum.
    pub fn is_clipped(&self) -> bool {
        self.measured == 0 || self.measured == MAX_LEVEL
    }
}

/// Regression family used to model the display response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMethod {
    /// Least-squares straight line.
    Linear,
    /// Cubic interpolant through every sample.
    Cubic,
    /// Smoothing cubic spline.
    Spline,
}

impl FitMethod {
    pub const ALL: [FitMethod; 3] = [FitMethod::Linear, FitMethod::Cubic, FitMethod::Spline];

    pub fn name(self) -> &'static str {
        match self {
            FitMethod::Linear => "linear",
            FitMethod::Cubic => "cubic",
            FitMethod::Spline => "spline",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FitMethod::Linear => "Linear",
            FitMethod::Cubic => "Cubic",
            FitMethod::Spline => "Spline",
        }
    }
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(FitMethod::Linear),
            "cubic" => Ok(FitMethod::Cubic),
            "spline" => Ok(FitMethod::Spline),
            other => Err(AppError::invalid(format!(
                "Unsupported fit method '{other}' (expected linear, cubic or spline)"
            ))),
        }
    }
}

/// RGB to gray conversion used when sampling the test image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GrayMethod {
    /// Mean of the smallest and largest channel.
    Lightness,
    /// Equal-weight channel mean.
    Average,
    /// Rec. 601 luma weights.
    Luminosity,
}

impl GrayMethod {
    /// Convert normalized RGB (each in `[0, 1]`) to a normalized gray value.
    pub fn convert(self, r: f64, g: f64, b: f64) -> f64 {
        match self {
            GrayMethod::Lightness => (r.min(g).min(b) + r.max(g).max(b)) * 0.5,
            GrayMethod::Average => (r + g + b) * 0.3333,
            GrayMethod::Luminosity => r * 0.2989 + g * 0.5870 + b * 0.1140,
        }
    }
}

impl FromStr for GrayMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lightness" => Ok(GrayMethod::Lightness),
            "average" => Ok(GrayMethod::Average),
            "luminosity" => Ok(GrayMethod::Luminosity),
            other => Err(AppError::invalid(format!("Unsupported rgb-to-gray method '{other}'"))),
        }
    }
}

/// Round half to even and saturate into an 8-bit level.
///
/// Non-finite values collapse to 0.
pub fn quantize_level(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, MAX_LEVEL as f64) as u8
}

/// Validate an integer level coming from an external provider.
pub fn level_from_i64(value: i64) -> AppResult<u8> {
    u8::try_from(value)
        .map_err(|_| AppError::unsupported(format!("Level {value} is outside [0, {MAX_LEVEL}]")))
}

/// Validate a floating level coming from an external provider.
///
/// The value must be finite, integral and inside `[0, 255]`.
pub fn level_from_f64(value: f64) -> AppResult<u8> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(AppError::unsupported(format!("Level {value} is not an integer")));
    }
    // `as` saturates, so huge values still fail the range check.
    level_from_i64(value as i64)
}

/// The full 8-bit input domain `0..=255`.
pub fn full_domain() -> Vec<u8> {
    (0..=MAX_LEVEL).collect()
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub image_path: PathBuf,
    pub gray_method: GrayMethod,
    /// Row to sample; negative values count from the bottom (`-1` is the last row).
    pub row: isize,
    /// Number of breakpoints (gray patches) along the sampled row.
    pub breakpoints: usize,
    pub method: FitMethod,
    /// Drop samples measured at 0 or 255 before fitting.
    pub skip_clipped: bool,
    /// Residual budget for the smoothing spline; `None` uses the sample count.
    pub spline_smoothing: Option<f64>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_lut: Option<PathBuf>,
    pub export_forward: Option<PathBuf>,
}

/// A saved inverse lookup table (JSON).
///
/// `inverse_output_levels[i]` is the input level to send so the display shows
/// `inverse_input_levels[i]` (always `i`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LutFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gray_method: Option<GrayMethod>,
    pub fit_method: FitMethod,
    pub filtered_clipped_samples: bool,
    pub inverse_input_levels: Vec<u8>,
    pub inverse_output_levels: Vec<u8>,
}

impl LutFile {
    /// Validate the table shape and return the lookup array.
    pub fn lookup(&self) -> AppResult<[u8; LEVEL_COUNT]> {
        if self.inverse_input_levels.len() != LEVEL_COUNT || self.inverse_output_levels.len() != LEVEL_COUNT {
            return Err(AppError::unsupported(format!(
                "LUT must hold {LEVEL_COUNT} entries, got {} inputs and {} outputs",
                self.inverse_input_levels.len(),
                self.inverse_output_levels.len()
            )));
        }
        let mut table = [0u8; LEVEL_COUNT];
        for (i, (&input, &output)) in self
            .inverse_input_levels
            .iter()
            .zip(self.inverse_output_levels.iter())
            .enumerate()
        {
            if input as usize != i {
                return Err(AppError::unsupported(format!(
                    "LUT input levels must be 0..=255 in order (entry {i} is {input})"
                )));
            }
            table[i] = output;
        }
        Ok(table)
    }
}
