//! Monitoring snapshot loading.
//!
//! A snapshot is read into a [`RawTable`] by the [`TabularSource`] registered
//! for the file's extension, checked against the required [`ColumnNames`],
//! and converted into typed [`MetricRow`]s.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;
use usage_core::config::ColumnNames;
use usage_core::error::{Result, UsageError};
use usage_core::models::{Dimension, HostIdentifier, MetricRow};

// ── Cells and tables ──────────────────────────────────────────────────────────

/// A single untyped cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Text that stands for a missing value, compared after trimming.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "<NA>", "N/A", "n/a", "NA", "NULL", "null", "None", "-", "--",
    "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN", "-NaN", "-nan",
];

impl Cell {
    /// Interpret the cell as a percentage value.
    ///
    /// Blank cells and missing-value markers (`N/A`, `NULL`, `-`, ...) yield
    /// `NaN`; text may carry surrounding whitespace and a trailing `%`.
    /// Returns `None` for anything else.
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Cell::Empty => Some(f64::NAN),
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
                    return Some(f64::NAN);
                }
                let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
                trimmed.parse::<f64>().ok()
            }
            Cell::Bool(_) => None,
        }
    }
}

/// Ordered header names plus ordered rows of cells, as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// File the table was read from.
    pub source: PathBuf,
    /// Header names in file order.
    pub columns: Vec<String>,
    /// Data rows; short CSV records are padded to the header width.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Position of `name` in the header, first match wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Validate the schema and convert the rows of `targets` into
    /// [`MetricRow`]s.
    ///
    /// Rows for other identifiers are skipped before their metric cells are
    /// read, so their content can never fail the run.
    pub fn to_metric_rows(
        &self,
        names: &ColumnNames,
        targets: &BTreeSet<HostIdentifier>,
    ) -> Result<Vec<MetricRow>> {
        let missing = check_schema(&self.columns, names);
        if !missing.is_empty() {
            return Err(UsageError::SchemaViolation { missing });
        }

        // Schema check guarantees every lookup below succeeds.
        let host_idx = self.column_index(&names.host).unwrap_or_default();

        let mut metrics = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let host = row.get(host_idx).map(Cell::to_string).unwrap_or_default();
            if !targets.contains(&host) {
                continue;
            }

            let mut metric = MetricRow {
                host,
                max_cpu: f64::NAN,
                max_mem: f64::NAN,
                max_disk: f64::NAN,
                source_row: i + 1,
            };
            for dimension in Dimension::ALL {
                let value = self.percent_at(row, names.for_dimension(dimension), &metric)?;
                metric.set_value(dimension, value);
            }
            metrics.push(metric);
        }

        debug!(
            "Converted {} of {} rows from {}",
            metrics.len(),
            self.rows.len(),
            self.source.display()
        );
        Ok(metrics)
    }

    fn percent_at(&self, row: &[Cell], column: &str, metric: &MetricRow) -> Result<f64> {
        let cell = self
            .column_index(column)
            .and_then(|idx| row.get(idx))
            .unwrap_or(&Cell::Empty);
        cell.as_percent().ok_or_else(|| {
            UsageError::io_failure(
                &self.source,
                format!(
                    "row {} ({}): column {} holds non-numeric value {:?}",
                    metric.source_row,
                    metric.host,
                    column,
                    cell.to_string()
                ),
            )
        })
    }
}

/// Required column names absent from `columns`, in contract order.
pub fn check_schema(columns: &[String], names: &ColumnNames) -> Vec<String> {
    names
        .required()
        .into_iter()
        .filter(|required| !columns.iter().any(|c| c == required))
        .map(str::to_string)
        .collect()
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// A reader for one tabular encoding.
pub trait TabularSource {
    /// Short name of the encoding, used in logs.
    fn name(&self) -> &'static str;

    /// Materialize the whole file. The first row is the header.
    fn read(&self, path: &Path) -> Result<RawTable>;
}

/// Comma-delimited text with a header record.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSource;

impl TabularSource for CsvSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn read(&self, path: &Path) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| UsageError::io_failure(path, e))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| UsageError::io_failure(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| UsageError::io_failure(path, e))?;
            let mut row: Vec<Cell> = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect();
            // Short records are filled with blanks up to the header width.
            if row.len() < columns.len() {
                row.resize(columns.len(), Cell::Empty);
            }
            rows.push(row);
        }

        Ok(RawTable {
            source: path.to_path_buf(),
            columns,
            rows,
        })
    }
}

/// First worksheet of an Office Open XML workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSource;

impl TabularSource for XlsxSource {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn read(&self, path: &Path) -> Result<RawTable> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| UsageError::io_failure(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| UsageError::io_failure(path, "workbook contains no worksheets"))?
            .map_err(|e| UsageError::io_failure(path, e))?;

        let mut sheet_rows = range.rows();
        let columns: Vec<String> = match sheet_rows.next() {
            Some(header) => header.iter().map(|c| cell_from_data(c).to_string()).collect(),
            None => Vec::new(),
        };
        let rows: Vec<Vec<Cell>> = sheet_rows
            .map(|r| r.iter().map(cell_from_data).collect())
            .collect();

        Ok(RawTable {
            source: path.to_path_buf(),
            columns,
            rows,
        })
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Formula errors such as `#N/A` carry no value.
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

/// Extension → reader registry. Extensions are lowercase, without the dot.
const SOURCES: &[(&str, &dyn TabularSource)] = &[("xlsx", &XlsxSource), ("csv", &CsvSource)];

/// Reader registered for `extension` (case-insensitive, no leading dot).
pub fn source_for_extension(extension: &str) -> Option<&'static dyn TabularSource> {
    let ext = extension.to_lowercase();
    SOURCES
        .iter()
        .find(|(registered, _)| *registered == ext)
        .map(|(_, source)| *source)
}

/// Read the monitoring snapshot at `path` with the reader its extension
/// selects.
pub fn load_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(UsageError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let source = source_for_extension(&extension).ok_or_else(|| {
        UsageError::UnsupportedFormat(if extension.is_empty() {
            String::new()
        } else {
            format!(".{}", extension)
        })
    })?;

    let table = source.read(path)?;
    debug!(
        "Read {} rows x {} columns from {} ({})",
        table.rows.len(),
        table.columns.len(),
        path.display(),
        source.name()
    );
    Ok(table)
}

/// Load, validate and convert the targeted rows of the snapshot at `path`.
pub fn load_metric_rows(
    path: &Path,
    names: &ColumnNames,
    targets: &BTreeSet<HostIdentifier>,
) -> Result<Vec<MetricRow>> {
    load_table(path)?.to_metric_rows(names, targets)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
