//! Command-line parsing for the GSDF curve tool.
//!
//! Argument parsing and command dispatch stay separate from the fitting and
//! inversion code; `app` maps these structs into a `FitConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FitMethod, GrayMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gsdf", version, about = "Display response (GSDF) curve fitting and inversion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the display response from a test image and write the inverse LUT.
    Invert(InvertArgs),
    /// Fit every method with and without clipped samples and compare their errors.
    Evaluate(EvaluateArgs),
    /// Correct a gray image through a saved inverse LUT.
    Apply(ApplyArgs),
    /// Plot a saved inverse LUT in the terminal.
    Plot(PlotArgs),
}

/// Where and how to sample the test image.
#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    /// Captured test image (a row of gray patches, dark to bright).
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,

    /// Row to sample; negative values count from the bottom (-1 is the last row).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub row: isize,

    /// Number of gray patches along the row.
    #[arg(short = 'n', long, default_value_t = 16)]
    pub breakpoints: usize,

    /// RGB to gray conversion.
    #[arg(long, value_enum, default_value_t = GrayMethod::Luminosity)]
    pub gray: GrayMethod,

    /// Residual budget for the smoothing spline (default: number of samples).
    #[arg(long)]
    pub smoothing: Option<f64>,
}

/// Options for `gsdf invert`.
#[derive(Debug, Args, Clone)]
pub struct InvertArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Regression method.
    #[arg(short = 'm', long, value_enum, default_value_t = FitMethod::Cubic)]
    pub method: FitMethod,

    /// Fit clipped samples (measured 0 or 255) too.
    #[arg(long)]
    pub keep_clipped: bool,

    /// Write the inverse LUT to JSON.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub out: Option<PathBuf>,

    /// Write the forward table (fitted + repaired) to CSV.
    #[arg(long = "export-forward", value_name = "CSV")]
    pub export_forward: Option<PathBuf>,

    /// Render the forward and inverse curves in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for `gsdf evaluate`.
#[derive(Debug, Args, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Also evaluate the last row, read right to left.
    #[arg(long)]
    pub bottom: bool,
}

/// Options for `gsdf apply`.
#[derive(Debug, Args, Clone)]
pub struct ApplyArgs {
    /// Image to correct.
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,

    /// Inverse LUT JSON produced by `gsdf invert --out`.
    #[arg(long, value_name = "JSON")]
    pub lut: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: PathBuf,

    /// RGB to gray conversion (defaults to the one recorded in the LUT).
    #[arg(long, value_enum)]
    pub gray: Option<GrayMethod>,
}

/// Options for `gsdf plot`.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Inverse LUT JSON produced by `gsdf invert --out`.
    #[arg(long, value_name = "JSON")]
    pub lut: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 64)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn invert_defaults() {
        let cli = Cli::try_parse_from(["gsdf", "invert", "--image", "gsdf.png"]).unwrap();
        let Command::Invert(args) = cli.command else {
            panic!("expected invert");
        };
        assert_eq!(args.profile.row, 0);
        assert_eq!(args.profile.breakpoints, 16);
        assert_eq!(args.profile.gray, GrayMethod::Luminosity);
        assert_eq!(args.method, FitMethod::Cubic);
        assert!(!args.keep_clipped);
        assert!(args.out.is_none());
    }

    #[test]
    fn negative_rows_and_methods_parse() {
        let cli = Cli::try_parse_from([
            "gsdf", "evaluate", "--image", "a.png", "--row", "-1", "--gray", "average", "--bottom",
        ])
        .unwrap();
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.profile.row, -1);
        assert_eq!(args.profile.gray, GrayMethod::Average);
        assert!(args.bottom);

        assert!(Cli::try_parse_from(["gsdf", "invert", "--image", "a.png", "--method", "quartic"]).is_err());
    }
}
