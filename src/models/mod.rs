//! Response model implementations.
//!
//! Every fitted curve is used through the same capability, [`ResponseModel`]:
//! a continuous map from an input level to a (real-valued) output level.
//! The concrete forms are:
//!
//! - [`Polynomial`]: least-squares straight line
//! - [`CubicInterpolant`]: not-a-knot cubic spline through every sample
//! - [`SmoothingSpline`]: penalized cubic spline with a residual budget
//! - [`PiecewiseLinear`]: straight segments between breakpoints (error baseline)

pub mod cubic;
pub mod model;
pub mod piecewise;
pub mod polynomial;
pub mod smoothing;
pub mod spline;

pub use cubic::*;
pub use model::*;
pub use piecewise::*;
pub use polynomial::*;
pub use smoothing::*;
pub use spline::*;
