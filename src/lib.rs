//! `gsdf-curves` library crate.
//!
//! Fits a display's measured gray-level response (GSDF) from a photographed
//! test pattern and inverts it into a correction lookup table.
//!
//! The binary (`gsdf`) is a thin wrapper around this library so the fitting
//! and inversion logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
