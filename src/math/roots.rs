//! Bracketed root finding (Brent's method).
//!
//! Given `f(a)` and `f(b)` of opposite sign, Brent's method combines bisection
//! with secant and inverse quadratic steps. It keeps the bracket at every step,
//! so it converges whenever bisection would, usually much faster.

use crate::error::{AppError, AppResult};

/// Convergence controls for [`brent`].
#[derive(Debug, Clone, Copy)]
pub struct RootOptions {
    /// Absolute tolerance on the root.
    pub xtol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
    pub max_iter: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// Find a root of `f` inside `[a, b]`.
///
/// Fails with `NumericDegenerate` when the endpoints do not bracket a sign
/// change, a function value is not finite, or the iteration budget runs out.
pub fn brent<F>(f: F, a: f64, b: f64, opts: RootOptions) -> AppResult<f64>
where
    F: Fn(f64) -> f64,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if !(fpre.is_finite() && fcur.is_finite()) {
        return Err(AppError::degenerate(format!(
            "Non-finite function value at bracket [{a}, {b}]"
        )));
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }
    if fpre.signum() == fcur.signum() {
        return Err(AppError::degenerate(format!(
            "No sign change on bracket [{a}, {b}] (f(a)={fpre}, f(b)={fcur})"
        )));
    }

    // `xblk` is the contrapoint: the root always lies between `xcur` and `xblk`.
    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..opts.max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (opts.xtol + opts.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = f(xcur);
        if !fcur.is_finite() {
            return Err(AppError::degenerate(format!("Non-finite function value at x={xcur}")));
        }
    }

    Err(AppError::degenerate(format!(
        "Root search did not converge within {} iterations",
        opts.max_iter
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_linear_root_exactly() {
        let root = brent(|x| x - 100.0, 0.0, 255.0, RootOptions::default()).unwrap();
        assert_eq!(root, 100.0);
    }

    #[test]
    fn finds_cubic_root() {
        let root = brent(|x| x * x * x - 2.0, 0.0, 2.0, RootOptions::default()).unwrap();
        assert!((root - 2f64.cbrt()).abs() < 1e-10);
    }

    #[test]
    fn returns_endpoint_roots() {
        assert_eq!(brent(|x| x, 0.0, 1.0, RootOptions::default()).unwrap(), 0.0);
        assert_eq!(brent(|x| x - 1.0, 0.0, 1.0, RootOptions::default()).unwrap(), 1.0);
    }

    #[test]
    fn rejects_missing_sign_change() {
        let err = brent(|_| 78.0, 0.0, 255.0, RootOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::NumericDegenerate(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = brent(|x| if x > 1.0 { f64::NAN } else { -1.0 }, 0.0, 2.0, RootOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::NumericDegenerate(_)));
    }
}
