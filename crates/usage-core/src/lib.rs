//! Shared building blocks for the host usage analyzer.
//!
//! Holds the error taxonomy, the metric data model, threshold / column
//! configuration, command-line settings and number formatting helpers used
//! by the data and report crates.

pub mod config;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
