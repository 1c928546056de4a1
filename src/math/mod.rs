//! Mathematical utilities: least squares, dense solves and bracketed root finding.

pub mod linear;
pub mod ols;
pub mod roots;

pub use linear::*;
pub use ols::*;
pub use roots::*;
