use clap::Parser;
use std::path::PathBuf;

use crate::config::AnalysisConfig;
use crate::error::Result;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyze individual host resource usage from monitoring data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "host-usage",
    about = "Analyze individual host resource usage from monitoring data",
    version
)]
pub struct Settings {
    /// Path to the monitoring data file (.xlsx or .csv)
    #[arg(short = 'd', long)]
    pub data: PathBuf,

    /// Path to the IP list file (.txt)
    #[arg(short = 'i', long)]
    pub ips: PathBuf,

    /// Show all hosts regardless of resource utilization
    #[arg(short = 'a', long)]
    pub all: bool,

    /// CPU ceiling in percent (default 10)
    #[arg(long, env = "HOST_USAGE_CPU_THRESHOLD")]
    pub cpu_threshold: Option<f64>,

    /// Memory ceiling in percent (default 20)
    #[arg(long, env = "HOST_USAGE_MEM_THRESHOLD")]
    pub mem_threshold: Option<f64>,

    /// Disk ceiling in percent (default 20)
    #[arg(long, env = "HOST_USAGE_DISK_THRESHOLD")]
    pub disk_threshold: Option<f64>,

    /// Configuration file (defaults to ~/.host-usage/config.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Build the analysis configuration: defaults, then the config file,
    /// then any threshold given on the command line.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let base = AnalysisConfig::discover(self.config.as_deref())?;
        self.apply_overrides(base)
    }

    /// Apply CLI threshold overrides on top of `config` and validate.
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> Result<AnalysisConfig> {
        if let Some(v) = self.cpu_threshold {
            config.thresholds.cpu = v;
        }
        if let Some(v) = self.mem_threshold {
            config.thresholds.mem = v;
        }
        if let Some(v) = self.disk_threshold {
            config.thresholds.disk = v;
        }
        config.thresholds.validate()?;
        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
