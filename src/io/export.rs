//! Export the forward (response) table to CSV.
//!
//! One row per domain level, easy to load in a spreadsheet next to the
//! measured patches.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Write `level,fitted,corrected,violation` rows.
///
/// `fitted` is the raw evaluated table, `corrected` the non-decreasing repair;
/// `violation` is 1 where the repair raised the value.
pub fn write_forward_csv(
    path: &Path,
    domain: &[u8],
    fitted: &[u8],
    corrected: &[u8],
    violations: &[usize],
) -> AppResult<()> {
    if fitted.len() != domain.len() || corrected.len() != domain.len() {
        return Err(AppError::invalid(format!(
            "Forward export needs one value per level (domain {}, fitted {}, corrected {})",
            domain.len(),
            fitted.len(),
            corrected.len()
        )));
    }

    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}'", path.display()), e))?;
    let mut w = BufWriter::new(file);
    write_rows(&mut w, domain, fitted, corrected, violations)
        .and_then(|_| w.flush())
        .map_err(|e| AppError::io(format!("Failed to write export CSV '{}'", path.display()), e))
}

fn write_rows(
    w: &mut impl Write,
    domain: &[u8],
    fitted: &[u8],
    corrected: &[u8],
    violations: &[usize],
) -> std::io::Result<()> {
    writeln!(w, "level,fitted,corrected,violation")?;
    for (i, ((level, raw), fixed)) in domain.iter().zip(fitted).zip(corrected).enumerate() {
        let flag = u8::from(violations.contains(&i));
        writeln!(w, "{level},{raw},{fixed},{flag}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::monotone::enforce_monotone;

    #[test]
    fn rows_flag_raised_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forward.csv");

        let domain = [0u8, 1, 2, 3];
        let fitted = [10u8, 20, 15, 30];
        let fixed = enforce_monotone(&fitted);
        write_forward_csv(&path, &domain, &fitted, &fixed.table, &fixed.violations).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "level,fitted,corrected,violation\n0,10,10,0\n1,20,20,0\n2,15,20,1\n3,30,30,0\n"
        );
    }

    #[test]
    fn length_mismatch_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forward.csv");
        assert!(matches!(
            write_forward_csv(&path, &[0, 1], &[0], &[0, 1], &[]),
            Err(AppError::InvalidInput(_))
        ));
        assert!(!path.exists());
    }
}
