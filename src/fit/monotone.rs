//! Non-decreasing repair of an evaluated response table.
//!
//! A display response cannot get darker as the input gets brighter, so any
//! dip in the fitted table is an artifact of the regression. The repair is a
//! left-to-right running maximum: each entry below the maximum so far is
//! raised to it and its index recorded. This is deliberately not isotonic
//! regression; it only ever raises values.

/// A repaired table and the indices that had to be raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonotoneOutput {
    pub table: Vec<u8>,
    /// Indices (in table order) where the fitted value dipped below the running maximum.
    pub violations: Vec<usize>,
}

impl MonotoneOutput {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn enforce_monotone(table: &[u8]) -> MonotoneOutput {
    let mut out = Vec::with_capacity(table.len());
    let mut violations = Vec::new();

    let mut running_max = None;
    for (i, &v) in table.iter().enumerate() {
        match running_max {
            Some(m) if v < m => {
                out.push(m);
                violations.push(i);
            }
            _ => {
                out.push(v);
                running_max = Some(v);
            }
        }
    }

    MonotoneOutput {
        table: out,
        violations,
    }
}
