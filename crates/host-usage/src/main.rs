mod bootstrap;

use anyhow::Result;
use usage_core::settings::Settings;
use usage_data::analysis::{run_analysis, AnalysisRequest};
use usage_report::table_view::render_report;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("host-usage v{} starting", env!("CARGO_PKG_VERSION"));

    // Expected failures are reported on stdout and the run ends normally.
    match run(&settings) {
        Ok(report) => print!("{}", report),
        Err(err) => {
            tracing::debug!("Analysis aborted: {:?}", err);
            println!("Error: {}", err);
        }
    }

    Ok(())
}

/// Resolve configuration, run the pipeline and render the report.
fn run(settings: &Settings) -> usage_core::error::Result<String> {
    let config = settings.analysis_config()?;
    tracing::debug!(
        "Thresholds: CPU={} MEM={} DISK={}",
        config.thresholds.cpu,
        config.thresholds.mem,
        config.thresholds.disk
    );

    let request = AnalysisRequest {
        data_path: settings.data.clone(),
        ips_path: settings.ips.clone(),
        config,
        show_all: settings.all,
    };

    let analysis = run_analysis(&request)?;
    Ok(render_report(&analysis, settings.all))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
