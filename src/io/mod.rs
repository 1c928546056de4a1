//! Input/output helpers.
//!
//! - image decoding + gray conversion (`image`)
//! - breakpoint sampling along a row (`profile`)
//! - inverse LUT JSON read/write and application (`lut`)
//! - forward table CSV export (`export`)

pub mod export;
pub mod image;
pub mod lut;
pub mod profile;

pub use export::*;
pub use self::image::*;
pub use lut::*;
pub use profile::*;
