//! Numerical inversion of a response model into a correction table.
//!
//! For every output level `y` we look for the input `x` with `model(x) = y`:
//!
//! 1. start from the full domain `[lo, hi]`
//! 2. walk `lo` up while `model(lo) >= y` and `hi` down while `model(hi) <= y`,
//!    one level at a time, never past the other end of the domain
//! 3. Brent's method on `model(x) - y` over the walked bracket
//!
//! A bracket end that hits `y` exactly is taken as the root. Any level that
//! cannot be bracketed or solved gets the sentinel 0 and is listed in
//! `unresolved`; the rest of the table is still produced. The walk assumes a
//! non-decreasing model; on other shapes it may simply fail to bracket.

use rayon::prelude::*;

use crate::domain::{LEVEL_COUNT, quantize_level};
use crate::error::{AppError, AppResult};
use crate::math::{RootOptions, brent};
use crate::models::ResponseModel;

/// Value stored for output levels the solver could not reach.
pub const UNRESOLVED_SENTINEL: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseTable {
    /// Target output levels `0..=255`.
    pub input_levels: Vec<u8>,
    /// `output_levels[y]` is the input level that makes the display show `y`.
    pub output_levels: Vec<u8>,
    /// Target levels that fell back to [`UNRESOLVED_SENTINEL`].
    pub unresolved: Vec<u8>,
}

/// Invert `model` over `domain` for every 8-bit target level.
///
/// Fails only if `domain` is empty; per-level numeric failures are absorbed.
pub fn invert<M>(domain: &[u8], model: &M) -> AppResult<InverseTable>
where
    M: ResponseModel + ?Sized,
{
    invert_with(domain, model, RootOptions::default())
}

pub fn invert_with<M>(domain: &[u8], model: &M, opts: RootOptions) -> AppResult<InverseTable>
where
    M: ResponseModel + ?Sized,
{
    let (Some(&lo), Some(&hi)) = (domain.iter().min(), domain.iter().max()) else {
        return Err(AppError::invalid("Inverse domain is empty"));
    };

    let solved: Vec<(u8, Option<u8>)> = (0..LEVEL_COUNT)
        .into_par_iter()
        .map(|y| {
            let y = y as u8;
            match solve_level(model, y, lo, hi, opts) {
                Ok(x) => (y, Some(quantize_level(x))),
                Err(err) => {
                    tracing::debug!(level = y, %err, "inverse level unresolved");
                    (y, None)
                }
            }
        })
        .collect();

    let mut input_levels = Vec::with_capacity(LEVEL_COUNT);
    let mut output_levels = Vec::with_capacity(LEVEL_COUNT);
    let mut unresolved = Vec::new();
    for (y, x) in solved {
        input_levels.push(y);
        output_levels.push(x.unwrap_or(UNRESOLVED_SENTINEL));
        if x.is_none() {
            unresolved.push(y);
        }
    }

    if !unresolved.is_empty() {
        tracing::warn!(
            count = unresolved.len(),
            first = unresolved[0],
            last = unresolved[unresolved.len() - 1],
            "some output levels are unreachable and fell back to the sentinel"
        );
    }

    Ok(InverseTable {
        input_levels,
        output_levels,
        unresolved,
    })
}

/// Solve `model(x) = target` for a single level inside `[lo, hi]`.
pub fn solve_level<M>(model: &M, target: u8, lo: u8, hi: u8, opts: RootOptions) -> AppResult<f64>
where
    M: ResponseModel + ?Sized,
{
    let target = target as f64;
    let (lo, hi) = (lo as f64, hi as f64);
    let eval = |x: f64| -> AppResult<f64> {
        let v = model.evaluate(x);
        if v.is_finite() {
            Ok(v)
        } else {
            Err(AppError::degenerate(format!("Model is not finite at x={x}")))
        }
    };

    let mut a = lo;
    loop {
        let v = eval(a)?;
        if v == target {
            return Ok(a);
        }
        if v < target {
            break;
        }
        a += 1.0;
        if a > hi {
            return Err(AppError::degenerate(format!(
                "model stays at or above {target} over the whole domain"
            )));
        }
    }

    let mut b = hi;
    loop {
        let v = eval(b)?;
        if v == target {
            return Ok(b);
        }
        if v > target {
            break;
        }
        b -= 1.0;
        if b < lo {
            return Err(AppError::degenerate(format!(
                "model stays at or below {target} over the whole domain"
            )));
        }
    }

    if a > b {
        return Err(AppError::degenerate(format!(
            "bracket for {target} collapsed to [{a}, {b}]"
        )));
    }

    brent(|x| model.evaluate(x) - target, a, b, opts)
}
