//! Sample construction and clipped-sample filtering.
//!
//! A display (or camera) saturates instead of reporting values past its range,
//! so a measurement of exactly 0 or 255 only says "at least this dark/bright".
//! Those samples can optionally be dropped before fitting.

use crate::domain::{Sample, level_from_f64};
use crate::error::{AppError, AppResult};

/// Pair reference and measured levels positionally.
pub fn samples_from_levels(reference: &[u8], measured: &[u8]) -> AppResult<Vec<Sample>> {
    if reference.len() != measured.len() {
        return Err(AppError::invalid(format!(
            "length is not matched for reference ({}) and measured ({}) levels",
            reference.len(),
            measured.len()
        )));
    }
    Ok(reference
        .iter()
        .zip(measured.iter())
        .map(|(&r, &m)| Sample::new(r, m))
        .collect())
}

/// Pair levels given as reals (e.g. decoded from a float image or a text
/// file); every value must be an integer in `[0, 255]`.
pub fn samples_from_real_levels(reference: &[f64], measured: &[f64]) -> AppResult<Vec<Sample>> {
    let reference = reference
        .iter()
        .map(|&v| level_from_f64(v))
        .collect::<AppResult<Vec<u8>>>()?;
    let measured = measured
        .iter()
        .map(|&v| level_from_f64(v))
        .collect::<AppResult<Vec<u8>>>()?;
    samples_from_levels(&reference, &measured)
}

/// Optionally drop samples whose measured level is 0 or 255.
///
/// With `keep_only_unsaturated = false` the input is returned unchanged.
pub fn filter_samples(samples: &[Sample], keep_only_unsaturated: bool) -> Vec<Sample> {
    if !keep_only_unsaturated {
        return samples.to_vec();
    }
    samples.iter().copied().filter(|s| !s.is_clipped()).collect()
}
