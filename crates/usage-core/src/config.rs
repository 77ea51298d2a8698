//! Threshold ceilings, column-name contract and the optional JSON
//! configuration file that can override both.
//!
//! The file lives at `~/.host-usage/config.json` unless an explicit path is
//! given. Every field is optional; absent fields keep their defaults:
//!
//! ```json
//! {
//!   "thresholds": { "cpu": 10, "mem": 20, "disk": 20 },
//!   "columns": { "host": "IP地址", "cpu": "最大CPU", "mem": "最大内存", "disk": "最大磁盘" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, UsageError};
use crate::models::Dimension;

// ── ThresholdConfig ───────────────────────────────────────────────────────────

/// Utilization ceilings, in percent. A value strictly below its ceiling is
/// underutilized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub cpu: f64,
    pub mem: f64,
    pub disk: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig {
            cpu: 10.0,
            mem: 20.0,
            disk: 20.0,
        }
    }
}

impl ThresholdConfig {
    /// Ceiling for a single dimension.
    pub fn ceiling(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Cpu => self.cpu,
            Dimension::Mem => self.mem,
            Dimension::Disk => self.disk,
        }
    }

    /// `value < ceiling`. NaN never qualifies.
    pub fn is_underutilized(&self, dimension: Dimension, value: f64) -> bool {
        value < self.ceiling(dimension)
    }

    /// Reject non-finite or negative ceilings.
    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let ceiling = self.ceiling(dimension);
            if !ceiling.is_finite() || ceiling < 0.0 {
                return Err(UsageError::Config(format!(
                    "{} threshold must be a non-negative number, got {}",
                    dimension.marker().trim_start_matches('#'),
                    ceiling
                )));
            }
        }
        Ok(())
    }
}

// ── ColumnNames ───────────────────────────────────────────────────────────────

/// Header names of the four required monitoring columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub host: String,
    pub cpu: String,
    pub mem: String,
    pub disk: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            host: "IP地址".to_string(),
            cpu: "最大CPU".to_string(),
            mem: "最大内存".to_string(),
            disk: "最大磁盘".to_string(),
        }
    }
}

impl ColumnNames {
    /// Required names in contract order: host, CPU, memory, disk.
    pub fn required(&self) -> [&str; 4] {
        [&self.host, &self.cpu, &self.mem, &self.disk]
    }

    /// Column name for a metric dimension.
    pub fn for_dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Cpu => &self.cpu,
            Dimension::Mem => &self.mem,
            Dimension::Disk => &self.disk,
        }
    }
}

// ── AnalysisConfig ────────────────────────────────────────────────────────────

/// Everything the analysis needs besides its two input files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: ThresholdConfig,
    pub columns: ColumnNames,
}

impl AnalysisConfig {
    /// `~/.host-usage/config.json`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| Self::config_path_in(&home))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".host-usage").join("config.json")
    }

    /// Load and validate the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(UsageError::NotFound(path.to_path_buf()));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| UsageError::io_failure(path, e))?;
        let config: AnalysisConfig = serde_json::from_str(&content)
            .map_err(|e| UsageError::Config(format!("{}: {}", path.display(), e)))?;
        config.thresholds.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise the default location is used
    /// when present, and built-in defaults when it is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        Self::discover_with_default(explicit, Self::default_path().as_deref())
    }

    /// Same as [`discover`](Self::discover) with an injectable default path.
    pub fn discover_with_default(
        explicit: Option<&Path>,
        default_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match default_path {
            Some(path) if path.exists() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
