//! Formatted terminal output.
//!
//! Formatting lives here so the fitting code stays free of presentation and
//! output changes stay localized (the tests below pin the layout).

use crate::domain::{FitConfig, Sample};
use crate::fit::inverse::InverseTable;
use crate::fit::monotone::MonotoneOutput;
use crate::fit::selection::Evaluation;

/// Header shown by `gsdf invert`.
pub fn format_run_summary(
    config: &FitConfig,
    samples: &[Sample],
    fitted: &[Sample],
    monotone: &MonotoneOutput,
    inverse: &InverseTable,
) -> String {
    let mut out = String::new();

    out.push_str("=== gsdf - GSDF curve fit ===\n");
    out.push_str(&format!("Image: {}\n", config.image_path.display()));
    out.push_str(&format!(
        "Profile: row={} | breakpoints={} | gray={:?}\n",
        config.row, config.breakpoints, config.gray_method
    ));
    out.push_str(&format!(
        "Method: {} | clipped samples {}\n",
        config.method.display_name(),
        if config.skip_clipped { "dropped" } else { "kept" }
    ));
    out.push_str(&format!(
        "Samples: n={} | fitted on n={}\n",
        samples.len(),
        fitted.len()
    ));

    out.push_str("\nBreakpoints (reference -> measured):\n");
    out.push_str(&format_samples(samples));

    out.push_str("\nForward table:\n");
    if monotone.is_clean() {
        out.push_str("- non-decreasing as fitted\n");
    } else {
        out.push_str(&format!(
            "- {} level(s) raised to keep it non-decreasing: {}\n",
            monotone.violations.len(),
            fmt_indices(&monotone.violations, 12)
        ));
    }

    out.push_str("\nInverse table:\n");
    if inverse.unresolved.is_empty() {
        out.push_str("- every output level resolved\n");
    } else {
        let levels: Vec<usize> = inverse.unresolved.iter().map(|&l| l as usize).collect();
        out.push_str(&format!(
            "- {} unreachable level(s) set to 0: {}\n",
            levels.len(),
            fmt_indices(&levels, 12)
        ));
    }
    out.push('\n');

    out
}

/// Variant diagnostics printed by `gsdf evaluate`.
pub fn format_evaluation(title: &str, eval: &Evaluation) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!(
        "Breakpoints: n={} unclipped | baseline span=[{}, {}]\n",
        eval.breakpoints.len(),
        eval.baseline.xs.first().copied().unwrap_or(0),
        eval.baseline.xs.last().copied().unwrap_or(0),
    ));

    out.push_str(&format_error_table(
        "Error at breakpoints",
        eval,
        eval.best_at_breakpoints,
        |f| (f.at_breakpoints.rmse, f.at_breakpoints.std),
    ));
    out.push_str(&format_error_table(
        "Error against piecewise-linear",
        eval,
        eval.best_vs_piecewise,
        |f| (f.vs_piecewise.rmse, f.vs_piecewise.std),
    ));

    for (variant, reason) in &eval.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", variant.label()));
    }
    out.push('\n');

    out
}

/// One labelled row of levels, e.g. a profile before/after correction.
pub fn format_levels(label: &str, levels: &[u8]) -> String {
    let parts: Vec<String> = levels.iter().map(|l| format!("{l:>3}")).collect();
    format!("{label:<10} {}\n", parts.join(" "))
}

fn format_error_table(
    heading: &str,
    eval: &Evaluation,
    best: usize,
    metric: impl Fn(&crate::fit::selection::VariantFit) -> (f64, f64),
) -> String {
    let mut out = format!("\n{heading}:\n");
    out.push_str(format!("  {:<16} {:>10} {:>10} {:>10}", "variant", "RMSE", "STD", "raised").trim_end());
    out.push('\n');
    out.push_str(format!("  {:-<16} {:-<10} {:-<10} {:-<10}", "", "", "", "").trim_end());
    out.push('\n');
    for (i, fit) in eval.fits.iter().enumerate() {
        let chosen = if i == best { "*" } else { " " };
        let (rmse, std) = metric(fit);
        out.push_str(
            format!(
                "{chosen} {:<16} {:>10.4} {:>10.4} {:>10}",
                truncate(&fit.variant.label(), 16),
                rmse,
                std,
                fit.monotone.violations.len()
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn format_samples(samples: &[Sample]) -> String {
    let mut out = String::new();
    for chunk in samples.chunks(8) {
        let parts: Vec<String> = chunk
            .iter()
            .map(|s| {
                let mark = if s.is_clipped() { "!" } else { "" };
                format!("{:>3}->{:>3}{mark}", s.reference, s.measured)
            })
            .collect();
        out.push_str(&format!("  {}\n", parts.join("  ")));
    }
    out
}

fn fmt_indices(v: &[usize], max: usize) -> String {
    let mut parts: Vec<String> = v.iter().take(max).map(|x| x.to_string()).collect();
    if v.len() > max {
        parts.push(format!("... (+{})", v.len() - max));
    }
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::full_domain;
    use crate::fit::selection::evaluate_variants;
    use crate::models::SplineOptions;

    #[test]
    fn index_lists_are_capped() {
        assert_eq!(fmt_indices(&[1, 2, 3], 5), "[1, 2, 3]");
        assert_eq!(fmt_indices(&[1, 2, 3, 4], 2), "[1, 2, ... (+2)]");
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("Partial spline", 16), "Partial spline");
        assert_eq!(truncate("abcdef", 4), "abc.");
    }

    #[test]
    fn level_rows_are_aligned() {
        assert_eq!(format_levels("measured", &[0, 17, 255]), "measured     0  17 255\n");
    }

    #[test]
    fn clipped_samples_are_flagged() {
        let txt = format_samples(&[Sample::new(0, 0), Sample::new(17, 20)]);
        assert_eq!(txt, "    0->  0!   17-> 20\n");
    }

    #[test]
    fn run_summary_reports_repairs_and_unreachable_levels() {
        use crate::domain::{FitMethod, GrayMethod};
        use crate::fit::monotone::enforce_monotone;
        use std::path::PathBuf;

        let config = FitConfig {
            image_path: PathBuf::from("gsdf.png"),
            gray_method: GrayMethod::Luminosity,
            row: -1,
            breakpoints: 2,
            method: FitMethod::Cubic,
            skip_clipped: true,
            spline_smoothing: None,
            plot: false,
            plot_width: 64,
            plot_height: 20,
            export_lut: None,
            export_forward: None,
        };
        let samples = [Sample::new(0, 0), Sample::new(255, 240)];
        let inverse = InverseTable {
            input_levels: vec![0, 1, 2],
            output_levels: vec![0, 5, 0],
            unresolved: vec![2],
        };
        let txt = format_run_summary(&config, &samples, &samples[1..], &enforce_monotone(&[1, 3, 2]), &inverse);

        assert!(txt.contains("Image: gsdf.png\n"));
        assert!(txt.contains("Profile: row=-1 | breakpoints=2 | gray=Luminosity\n"));
        assert!(txt.contains("Method: Cubic | clipped samples dropped\n"));
        assert!(txt.contains("Samples: n=2 | fitted on n=1\n"));
        assert!(txt.contains("- 1 level(s) raised to keep it non-decreasing: [2]\n"));
        assert!(txt.contains("- 1 unreachable level(s) set to 0: [2]\n"));
    }

    #[test]
    fn evaluation_marks_exactly_one_best_per_table() {
        let reference: Vec<u8> = (0..10).map(|i| (i * 28) as u8).collect();
        let samples: Vec<Sample> = reference
            .iter()
            .map(|&r| Sample::new(r, (r as f64 * 0.9 + 10.0).round() as u8))
            .collect();
        let eval = evaluate_variants(&samples, &full_domain(), SplineOptions::default()).unwrap();
        let txt = format_evaluation("Top row", &eval);

        assert!(txt.starts_with("=== Top row ===\n"));
        assert!(txt.contains("Error at breakpoints:"));
        assert!(txt.contains("Error against piecewise-linear:"));
        let starred = txt.lines().filter(|l| l.starts_with('*')).count();
        assert_eq!(starred, 2);
        assert!(txt.contains("Partial cubic"));
    }
}
