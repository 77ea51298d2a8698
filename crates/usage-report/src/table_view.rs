//! Fixed-width host table plus the diagnostics and summary around it.

use unicode_width::UnicodeWidthStr;
use usage_core::formatting;
use usage_core::models::HostFinding;
use usage_data::analyzer::Analysis;

/// Width of the identifier column.
pub const HOST_WIDTH: usize = 18;
/// Width of each metric column.
pub const METRIC_WIDTH: usize = 12;
/// Width of the trigger column.
pub const TRIGGER_WIDTH: usize = 15;
/// Length of the divider rule.
pub const TOTAL_WIDTH: usize = HOST_WIDTH + METRIC_WIDTH * 3 + TRIGGER_WIDTH;

const HEADERS: [&str; 5] = ["IP Address", "Max CPU", "Max Mem", "Max Disk", "Trigger"];

/// Printed instead of the table when nothing qualifies.
pub const NO_HOSTS_MESSAGE: &str = "No hosts found with the specified criteria";

/// Render the complete report for `analysis`.
///
/// Layout:
/// 1. missing-identifier warning (only when some are missing), then a blank
///    line;
/// 2. the found / requested line;
/// 3. either [`NO_HOSTS_MESSAGE`] or the title, table and summary.
pub fn render_report(analysis: &Analysis, show_all: bool) -> String {
    let mut out = String::new();

    if !analysis.missing.is_empty() {
        out.push_str("Warning: the following IPs were not found in the monitoring data:\n");
        for host in &analysis.missing {
            out.push_str(&format!("  - {}\n", host));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Found {} of {} target IPs in the monitoring data\n",
        analysis.found_count, analysis.target_count
    ));

    if analysis.findings.is_empty() {
        out.push_str(NO_HOSTS_MESSAGE);
        out.push('\n');
        return out;
    }

    let title = if show_all {
        "Hosts with Resource Usage:"
    } else {
        "Hosts with Underutilized Resources:"
    };
    out.push_str(&format!("\n{}\n", title));
    out.push_str(&render_table(&analysis.findings));

    out.push_str("\nSummary:\n");
    out.push_str(&format!("  - Qualifying hosts: {}\n", analysis.findings.len()));
    out.push_str(&format!("  - Total target hosts: {}\n", analysis.target_count));
    if !show_all {
        let ratio = formatting::percentage(analysis.findings.len(), analysis.found_count);
        out.push_str(&format!(
            "  - Underutilized host ratio: {}\n",
            formatting::format_percent(ratio, 1)
        ));
    }

    out
}

/// Divider, header, divider, then one line per finding.
pub fn render_table(findings: &[HostFinding]) -> String {
    let rule = "-".repeat(TOTAL_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format_row(HEADERS));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for finding in findings {
        let cpu = formatting::format_percent(finding.max_cpu, 2);
        let mem = formatting::format_percent(finding.max_mem, 2);
        let disk = formatting::format_percent(finding.max_disk, 2);
        let trigger = finding.trigger.tag();
        out.push_str(&format_row([&finding.host, &cpu, &mem, &disk, &trigger]));
        out.push('\n');
    }

    out
}

fn format_row(cells: [&str; 5]) -> String {
    let widths = [HOST_WIDTH, METRIC_WIDTH, METRIC_WIDTH, METRIC_WIDTH, TRIGGER_WIDTH];
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_right(cell, width))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Left-justify `text` in `width` terminal columns. Longer text is kept whole.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(used));
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    padded
}

// ── Tests ──────────────────────────────────────────────────────────────────────
