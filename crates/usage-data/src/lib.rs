//! Data ingestion and analysis layer for the host usage analyzer.
//!
//! Loads the target identifier list and the monitoring snapshot (CSV or
//! XLSX), validates the column schema, and reconciles the two into an
//! [`analyzer::Analysis`] ready for rendering.

pub mod analysis;
pub mod analyzer;
pub mod identifiers;
pub mod table;

pub use usage_core as core;
