//! End-to-end analysis pipeline.
//!
//! Loads the identifier list and the monitoring snapshot, then hands both to
//! the [`UsageAnalyzer`]. Any hard error aborts before analysis starts.

use std::path::PathBuf;

use tracing::debug;
use usage_core::config::AnalysisConfig;
use usage_core::error::Result;

use crate::analyzer::{Analysis, UsageAnalyzer};
use crate::identifiers::load_identifiers;
use crate::table::load_metric_rows;

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Monitoring snapshot (`.xlsx` or `.csv`).
    pub data_path: PathBuf,
    /// Newline-delimited identifier list.
    pub ips_path: PathBuf,
    /// Thresholds and column names.
    pub config: AnalysisConfig,
    /// Report every targeted row instead of only underutilized ones.
    pub show_all: bool,
}

/// Run the full pipeline.
///
/// 1. Load the target identifiers.
/// 2. Load the snapshot, check its schema and convert the targeted rows to
///    metric rows.
/// 3. Analyze the rows against the configured thresholds.
pub fn run_analysis(request: &AnalysisRequest) -> Result<Analysis> {
    let load_start = std::time::Instant::now();
    let targets = load_identifiers(&request.ips_path)?;
    let rows = load_metric_rows(&request.data_path, &request.config.columns, &targets)?;
    debug!(
        "Loaded {} targets and {} rows in {:.3}s",
        targets.len(),
        rows.len(),
        load_start.elapsed().as_secs_f64()
    );

    let analyzer = UsageAnalyzer::new(request.config.thresholds);
    Ok(analyzer.analyze(&rows, &targets, request.show_all))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
