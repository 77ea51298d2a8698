//! Text report rendering for the host usage analyzer.
//!
//! Turns an [`usage_data::analyzer::Analysis`] into the fixed-width table
//! and summary printed on stdout.

pub mod table_view;

pub use usage_core as core;
