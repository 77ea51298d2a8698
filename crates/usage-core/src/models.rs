use std::fmt;

/// Opaque host identifier. Only exact string equality is relied upon.
pub type HostIdentifier = String;

/// Resource dimension evaluated against a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Cpu,
    Mem,
    Disk,
}

impl Dimension {
    /// Evaluation and tag order.
    pub const ALL: [Dimension; 3] = [Dimension::Cpu, Dimension::Mem, Dimension::Disk];

    /// Marker appended to a trigger tag when this dimension is underutilized.
    pub fn marker(self) -> &'static str {
        match self {
            Dimension::Cpu => "#CPU",
            Dimension::Mem => "#MEM",
            Dimension::Disk => "#DISK",
        }
    }
}

/// One row of monitoring data.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Host identifier as it appears in the monitoring export.
    pub host: HostIdentifier,
    /// Peak CPU utilization, percent.
    pub max_cpu: f64,
    /// Peak memory utilization, percent.
    pub max_mem: f64,
    /// Peak disk utilization, percent.
    pub max_disk: f64,
    /// 1-based data row number in the source table (header excluded).
    pub source_row: usize,
}

impl MetricRow {
    /// Value of a single dimension.
    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Cpu => self.max_cpu,
            Dimension::Mem => self.max_mem,
            Dimension::Disk => self.max_disk,
        }
    }

    /// Overwrite the value of a single dimension.
    pub fn set_value(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Cpu => self.max_cpu = value,
            Dimension::Mem => self.max_mem = value,
            Dimension::Disk => self.max_disk = value,
        }
    }
}

/// Set of dimensions on which a host is underutilized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigger {
    pub cpu: bool,
    pub mem: bool,
    pub disk: bool,
}

impl Trigger {
    /// Mark `dimension` as triggered.
    pub fn set(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Cpu => self.cpu = true,
            Dimension::Mem => self.mem = true,
            Dimension::Disk => self.disk = true,
        }
    }

    /// Whether `dimension` is triggered.
    pub fn contains(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Cpu => self.cpu,
            Dimension::Mem => self.mem,
            Dimension::Disk => self.disk,
        }
    }

    /// `true` when no dimension triggered.
    pub fn is_empty(&self) -> bool {
        !(self.cpu || self.mem || self.disk)
    }

    /// Trigger tag, e.g. `"#CPU#DISK"`; empty when nothing triggered.
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dimension in Dimension::ALL {
            if self.contains(dimension) {
                f.write_str(dimension.marker())?;
            }
        }
        Ok(())
    }
}

/// A monitoring row that made it into the report.
#[derive(Debug, Clone, PartialEq)]
pub struct HostFinding {
    pub host: HostIdentifier,
    pub max_cpu: f64,
    pub max_mem: f64,
    pub max_disk: f64,
    pub trigger: Trigger,
}

impl HostFinding {
    /// Build a finding from its source row and evaluated trigger.
    pub fn new(row: &MetricRow, trigger: Trigger) -> Self {
        HostFinding {
            host: row.host.clone(),
            max_cpu: row.max_cpu,
            max_mem: row.max_mem,
            max_disk: row.max_disk,
            trigger,
        }
    }
}
