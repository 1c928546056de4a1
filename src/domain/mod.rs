//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement pairs (`Sample`) and level helpers
//! - method enums (`FitMethod`, `GrayMethod`)
//! - run configuration (`FitConfig`) and the persisted table (`LutFile`)

pub mod types;

pub use types::*;
