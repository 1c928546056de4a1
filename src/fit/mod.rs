//! Curve fitting and inversion.
//!
//! Responsibilities:
//!
//! - pair reference/measured levels and drop clipped samples
//! - fit a response model and evaluate it over the 8-bit domain
//! - repair the table to be non-decreasing
//! - invert the model into a correction table (parallel per level)
//! - score every fit variant against the measured breakpoints

pub mod filter;
pub mod fitter;
pub mod inverse;
pub mod monotone;
pub mod piecewise;
pub mod selection;

pub use filter::*;
pub use fitter::*;
pub use inverse::*;
pub use monotone::*;
pub use piecewise::*;
pub use selection::*;
