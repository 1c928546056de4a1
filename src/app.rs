//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit/inversion pipeline or the variant evaluation
//! - prints reports/plots
//! - writes the LUT and optional exports

use clap::Parser;

use crate::cli::{ApplyArgs, Command, EvaluateArgs, InvertArgs, PlotArgs, ProfileArgs};
use crate::domain::{FitConfig, FitMethod, GrayMethod};
use crate::error::AppResult;

pub mod pipeline;

/// Entry point for the `gsdf` binary.
pub fn run() -> AppResult<()> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Invert(args) => handle_invert(args),
        Command::Evaluate(args) => handle_evaluate(args),
        Command::Apply(args) => handle_apply(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_invert(args: InvertArgs) -> AppResult<()> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_invert(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.samples, &run.fit.samples, &run.monotone, &run.inverse)
    );
    print!("{}", crate::report::format_levels("measured", &run.profile.levels));
    println!("{}", crate::report::format_levels("corrected", &run.corrected_profile.levels));

    if config.plot {
        let forward = crate::plot::render_forward_plot(
            &run.domain,
            &run.monotone.table,
            &run.samples,
            &run.monotone.violations,
            config.plot_width,
            config.plot_height,
        );
        let inverse = crate::plot::render_inverse_plot(
            &run.inverse.input_levels,
            &run.inverse.output_levels,
            &run.inverse.unresolved,
            config.plot_width,
            config.plot_height,
        );
        println!("{forward}");
        println!("{inverse}");
    }

    if let Some(path) = &config.export_lut {
        crate::io::lut::write_lut_json(path, &run.lut)?;
        tracing::info!(path = %path.display(), "inverse LUT written");
    }
    if let Some(path) = &config.export_forward {
        crate::io::export::write_forward_csv(
            path,
            &run.domain,
            &run.fit.table,
            &run.monotone.table,
            &run.monotone.violations,
        )?;
        tracing::info!(path = %path.display(), "forward table written");
    }

    Ok(())
}

fn handle_evaluate(args: EvaluateArgs) -> AppResult<()> {
    let config = fit_config_from_profile(&args.profile, FitMethod::Cubic, true);
    let out = pipeline::run_evaluate(&config, args.bottom)?;

    let top_title = format!("Row {} (as read)", config.row);
    println!("{}", crate::report::format_evaluation(&top_title, &out.top));
    if let Some(bottom) = &out.bottom {
        println!("{}", crate::report::format_evaluation("Bottom row (reversed)", bottom));
    }
    Ok(())
}

fn handle_apply(args: ApplyArgs) -> AppResult<()> {
    let lut = crate::io::lut::read_lut_json(&args.lut)?;
    let gray_method = args
        .gray
        .or(lut.gray_method)
        .unwrap_or(GrayMethod::Luminosity);

    let gray = crate::io::image::load_gray8(&args.image, gray_method)?;
    let corrected = crate::io::lut::apply_lut(&gray, &lut.lookup()?);
    crate::io::image::save_gray8(&args.out, &corrected)?;

    println!(
        "Corrected {} -> {} ({}x{}, gray={gray_method:?}, fit={})",
        args.image.display(),
        args.out.display(),
        corrected.width(),
        corrected.height(),
        lut.fit_method.display_name()
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> AppResult<()> {
    let lut = crate::io::lut::read_lut_json(&args.lut)?;
    let plot = crate::plot::render_inverse_plot(
        &lut.inverse_input_levels,
        &lut.inverse_output_levels,
        &[],
        args.width,
        args.height,
    );
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &InvertArgs) -> FitConfig {
    FitConfig {
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_lut: args.out.clone(),
        export_forward: args.export_forward.clone(),
        ..fit_config_from_profile(&args.profile, args.method, !args.keep_clipped)
    }
}

fn fit_config_from_profile(profile: &ProfileArgs, method: FitMethod, skip_clipped: bool) -> FitConfig {
    FitConfig {
        image_path: profile.image.clone(),
        gray_method: profile.gray,
        row: profile.row,
        breakpoints: profile.breakpoints,
        method,
        skip_clipped,
        spline_smoothing: profile.smoothing,
        plot: false,
        plot_width: 64,
        plot_height: 20,
        export_lut: None,
        export_forward: None,
    }
}
