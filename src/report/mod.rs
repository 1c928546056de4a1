//! Reporting utilities: table errors against measured breakpoints, plus
//! formatted terminal output (`format`).

use crate::error::{AppError, AppResult};

pub mod format;

pub use format::*;

/// Error summary of a table against reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    pub rmse: f64,
    /// Population standard deviation of the differences.
    pub std: f64,
    pub n: usize,
}

impl ErrorStats {
    pub fn from_differences(diffs: &[f64]) -> Self {
        let n = diffs.len();
        if n == 0 {
            return Self {
                rmse: f64::NAN,
                std: f64::NAN,
                n,
            };
        }
        let n_f = n as f64;
        let mean = diffs.iter().sum::<f64>() / n_f;
        let mse = diffs.iter().map(|d| d * d).sum::<f64>() / n_f;
        let var = diffs.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n_f;
        Self {
            rmse: mse.sqrt(),
            std: var.sqrt(),
            n,
        }
    }
}

/// `table[level] - expected` for each `(level, expected)` pair.
///
/// `table` is indexed through `domain` (`table[i]` belongs to `domain[i]`);
/// levels missing from the domain are an error.
pub fn table_differences(table: &[u8], domain: &[u8], xs: &[u8], ys: &[u8]) -> AppResult<Vec<f64>> {
    if table.len() != domain.len() || xs.len() != ys.len() {
        return Err(AppError::invalid("length is not matched for table/domain or x/y"));
    }
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let idx = domain
                .iter()
                .position(|&d| d == x)
                .ok_or_else(|| AppError::invalid(format!("Level {x} is outside the evaluated domain")))?;
            Ok(table[idx] as f64 - y as f64)
        })
        .collect()
}
