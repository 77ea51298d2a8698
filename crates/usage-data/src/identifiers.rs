//! Target identifier list loading.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use tracing::info;
use usage_core::error::{Result, UsageError};
use usage_core::models::HostIdentifier;

/// Read a newline-delimited identifier list into the target set.
///
/// Each line is trimmed; blank lines are skipped. Duplicate lines collapse
/// into a single member.
pub fn load_identifiers(path: &Path) -> Result<BTreeSet<HostIdentifier>> {
    if !path.exists() {
        return Err(UsageError::NotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| UsageError::io_failure(path, e))?;
    let reader = std::io::BufReader::new(file);

    let mut lines_read = 0usize;
    let mut targets = BTreeSet::new();
    for line in reader.lines() {
        let line = line.map_err(|e| UsageError::io_failure(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines_read += 1;
        targets.insert(trimmed.to_string());
    }

    info!(
        "Read {} identifiers from {} ({} distinct)",
        lines_read,
        path.display(),
        targets.len()
    );

    Ok(targets)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
