use crate::error::{AppError, AppResult};
use crate::math::{polyfit, polyval};
use crate::models::ResponseModel;

/// Polynomial response, coefficients highest power first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    /// Least-squares fit of the given degree.
    pub fn fit(xs: &[f64], ys: &[f64], degree: usize) -> AppResult<Self> {
        if xs.len() != ys.len() {
            return Err(AppError::invalid(format!(
                "length is not matched for x ({}) and y ({})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() <= degree {
            return Err(AppError::invalid(format!(
                "A degree-{degree} fit needs at least {} samples, got {}",
                degree + 1,
                xs.len()
            )));
        }
        let mut distinct = xs.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() <= degree {
            return Err(AppError::invalid(format!(
                "A degree-{degree} fit needs at least {} distinct reference levels, got {}",
                degree + 1,
                distinct.len()
            )));
        }
        let coeffs = polyfit(xs, ys, degree)
            .ok_or_else(|| AppError::degenerate("Least-squares polynomial fit is singular"))?;
        Ok(Self { coeffs })
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }
}

impl ResponseModel for Polynomial {
    fn evaluate(&self, x: f64) -> f64 {
        polyval(&self.coeffs, x)
    }
}
