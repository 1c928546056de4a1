//! ASCII plotting of response and correction tables for terminal output.
//!
//! Fixed-size character grid, deterministic output (pinned by a golden test).
//!
//! Plot elements:
//! - table curve: `-` line
//! - measured breakpoints: `o`
//! - levels raised by the monotone repair: `x`
//! - unresolved inverse levels: `?`

use crate::domain::{MAX_LEVEL, Sample};

/// Forward response: fitted table over `domain`, measured samples and repaired levels.
pub fn render_forward_plot(
    domain: &[u8],
    table: &[u8],
    samples: &[Sample],
    violations: &[usize],
    width: usize,
    height: usize,
) -> String {
    let curve: Vec<(f64, f64)> = domain
        .iter()
        .zip(table.iter())
        .map(|(&x, &y)| (x as f64, y as f64))
        .collect();

    let mut markers: Vec<(f64, f64, char)> = violations
        .iter()
        .filter_map(|&i| Some((*domain.get(i)? as f64, *table.get(i)? as f64, 'x')))
        .collect();
    markers.extend(
        samples
            .iter()
            .map(|s| (s.reference as f64, s.measured as f64, 'o')),
    );

    render_plot("Forward", &curve, &markers, width, height)
}

/// Inverse (correction) table; `unresolved` output levels are marked.
pub fn render_inverse_plot(
    input_levels: &[u8],
    output_levels: &[u8],
    unresolved: &[u8],
    width: usize,
    height: usize,
) -> String {
    let curve: Vec<(f64, f64)> = input_levels
        .iter()
        .zip(output_levels.iter())
        .filter(|(y, _)| !unresolved.contains(*y))
        .map(|(&y, &x)| (y as f64, x as f64))
        .collect();
    let markers: Vec<(f64, f64, char)> = unresolved.iter().map(|&y| (y as f64, 0.0, '?')).collect();

    render_plot("Inverse", &curve, &markers, width, height)
}

fn render_plot(
    title: &str,
    curve: &[(f64, f64)],
    markers: &[(f64, f64, char)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = (0.0, MAX_LEVEL as f64);
    let (y_min, y_max) = y_range(curve, markers).unwrap_or((0.0, MAX_LEVEL as f64));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so markers overlay it.
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    for &(x, y, ch) in markers {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = ch;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{title}: x=[{x_min:.0}, {x_max:.0}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(curve: &[(f64, f64)], markers: &[(f64, f64, char)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for y in curve.iter().map(|p| p.1).chain(markers.iter().map(|m| m.1)) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the plot.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, '-'),
            None => grid[row][col] = '-',
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
