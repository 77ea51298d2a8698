//! Threshold evaluation and identifier reconciliation.
//!
//! Cross-references monitoring rows with the requested identifiers, tags
//! every kept row with the dimensions it underutilizes, and orders the
//! result by identifier.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};
use usage_core::config::ThresholdConfig;
use usage_core::models::{Dimension, HostFinding, HostIdentifier, MetricRow, Trigger};

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Results of one analysis run plus the diagnostics the report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Report rows, sorted by identifier; duplicates keep source order.
    pub findings: Vec<HostFinding>,
    /// Requested identifiers with no monitoring row, sorted.
    pub missing: Vec<HostIdentifier>,
    /// Distinct requested identifiers that have at least one row.
    pub found_count: usize,
    /// Size of the target identifier set.
    pub target_count: usize,
}

impl Analysis {
    /// `true` when no monitoring row matched any target identifier.
    pub fn no_rows_matched(&self) -> bool {
        self.found_count == 0
    }
}

// ── UsageAnalyzer ─────────────────────────────────────────────────────────────

/// Applies a [`ThresholdConfig`] to monitoring rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageAnalyzer {
    thresholds: ThresholdConfig,
}

impl UsageAnalyzer {
    /// Create an analyzer with the given ceilings.
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Ceilings in use.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Dimensions on which `row` is strictly below its ceiling.
    pub fn evaluate(&self, row: &MetricRow) -> Trigger {
        let mut trigger = Trigger::default();
        for dimension in Dimension::ALL {
            if self
                .thresholds
                .is_underutilized(dimension, row.value(dimension))
            {
                trigger.set(dimension);
            }
        }
        trigger
    }

    /// Reconcile `rows` against `targets` and tag each kept row.
    ///
    /// 1. Rows whose identifier is not a target are dropped, even when
    ///    `show_all` is set.
    /// 2. Targets without any row are reported in [`Analysis::missing`].
    /// 3. A kept row is reported when it triggered at least one dimension,
    ///    or unconditionally when `show_all` is set.
    /// 4. Findings are stably sorted by identifier.
    pub fn analyze(
        &self,
        rows: &[MetricRow],
        targets: &BTreeSet<HostIdentifier>,
        show_all: bool,
    ) -> Analysis {
        let matched: Vec<&MetricRow> = rows
            .iter()
            .filter(|row| targets.contains(&row.host))
            .collect();

        let found: HashSet<&str> = matched.iter().map(|row| row.host.as_str()).collect();
        // BTreeSet iteration is already sorted.
        let missing: Vec<HostIdentifier> = targets
            .iter()
            .filter(|t| !found.contains(t.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            warn!(
                "{} requested identifiers not found in monitoring data: {}",
                missing.len(),
                missing.join(", ")
            );
        }

        let mut findings: Vec<HostFinding> = matched
            .iter()
            .filter_map(|row| {
                let trigger = self.evaluate(row);
                (show_all || !trigger.is_empty()).then(|| HostFinding::new(row, trigger))
            })
            .collect();
        findings.sort_by(|a, b| a.host.cmp(&b.host));

        debug!(
            "UsageAnalyzer: {} rows, {} matched, {} reported (show_all={})",
            rows.len(),
            matched.len(),
            findings.len(),
            show_all
        );

        let analysis = Analysis {
            findings,
            missing,
            found_count: found.len(),
            target_count: targets.len(),
        };
        if analysis.no_rows_matched() {
            warn!("No monitoring rows matched the requested identifiers");
        }
        analysis
    }
}

/// Run a [`UsageAnalyzer`] built from `thresholds` over `rows`.
pub fn analyze(
    rows: &[MetricRow],
    targets: &BTreeSet<HostIdentifier>,
    thresholds: &ThresholdConfig,
    show_all: bool,
) -> Analysis {
    UsageAnalyzer::new(*thresholds).analyze(rows, targets, show_all)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn row(host: &str, cpu: f64, mem: f64, disk: f64) -> MetricRow {
        MetricRow {
            host: host.to_string(),
            max_cpu: cpu,
            max_mem: mem,
            max_disk: disk,
            source_row: 0,
        }
    }

    fn targets(ids: &[&str]) -> BTreeSet<HostIdentifier> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn tags(analysis: &Analysis) -> Vec<(String, String)> {
        analysis
            .findings
            .iter()
            .map(|f| (f.host.clone(), f.trigger.tag()))
            .collect()
    }

    fn sample_rows() -> Vec<MetricRow> {
        vec![
            row("10.0.0.1", 5.0, 25.0, 15.0),
            row("10.0.0.2", 50.0, 50.0, 50.0),
        ]
    }

    // ── evaluate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_evaluate_equal_to_ceiling_never_triggers() {
        let analyzer = UsageAnalyzer::default();
        let trigger = analyzer.evaluate(&row("h", 10.0, 20.0, 20.0));
        assert!(trigger.is_empty());
    }

    #[test]
    fn test_evaluate_tag_order_independent_of_magnitude() {
        let analyzer = UsageAnalyzer::default();
        // Disk breaches far more than CPU, tag order stays CPU, MEM, DISK.
        let trigger = analyzer.evaluate(&row("h", 9.9, 19.0, 0.1));
        assert_eq!(trigger.tag(), "#CPU#MEM#DISK");
    }

    #[test]
    fn test_evaluate_custom_thresholds() {
        let analyzer = UsageAnalyzer::new(ThresholdConfig {
            cpu: 50.0,
            mem: 0.0,
            disk: 100.0,
        });
        let trigger = analyzer.evaluate(&row("h", 49.0, 0.0, 99.0));
        assert_eq!(trigger.tag(), "#CPU#DISK");
    }

    #[test]
    fn test_evaluate_nan_never_triggers() {
        let analyzer = UsageAnalyzer::default();
        let trigger = analyzer.evaluate(&row("h", f64::NAN, 1.0, f64::NAN));
        assert_eq!(trigger.tag(), "#MEM");
    }

    // ── analyze ───────────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_underutilized_only() {
        let analysis = analyze(
            &sample_rows(),
            &targets(&["10.0.0.1", "10.0.0.2"]),
            &ThresholdConfig::default(),
            false,
        );

        assert_eq!(
            tags(&analysis),
            vec![("10.0.0.1".to_string(), "#CPU#DISK".to_string())]
        );
        assert_eq!(analysis.found_count, 2);
        assert_eq!(analysis.target_count, 2);
        assert!(analysis.missing.is_empty());
    }

    #[test]
    fn test_analyze_show_all_includes_untriggered() {
        let analysis = analyze(
            &sample_rows(),
            &targets(&["10.0.0.1", "10.0.0.2"]),
            &ThresholdConfig::default(),
            true,
        );

        assert_eq!(
            tags(&analysis),
            vec![
                ("10.0.0.1".to_string(), "#CPU#DISK".to_string()),
                ("10.0.0.2".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_analyze_missing_identifiers_sorted() {
        let analysis = analyze(
            &sample_rows(),
            &targets(&["10.0.0.3", "10.0.0.1", "10.0.0.10"]),
            &ThresholdConfig::default(),
            false,
        );

        assert_eq!(analysis.missing, vec!["10.0.0.10", "10.0.0.3"]);
        assert_eq!(analysis.found_count, 1);
        assert_eq!(analysis.target_count, 3);
    }

    #[test]
    fn test_analyze_untargeted_rows_excluded_even_in_show_all() {
        let rows = vec![row("10.0.0.9", 1.0, 1.0, 1.0), row("10.0.0.1", 50.0, 50.0, 50.0)];
        let analysis = analyze(&rows, &targets(&["10.0.0.1"]), &ThresholdConfig::default(), true);

        assert_eq!(analysis.findings.len(), 1);
        assert!(analysis.findings.iter().all(|f| f.host == "10.0.0.1"));
    }

    #[test]
    fn test_analyze_sorted_with_stable_duplicates() {
        let rows = vec![
            row("b", 1.0, 50.0, 50.0),
            row("a", 1.0, 50.0, 50.0),
            row("b", 2.0, 50.0, 50.0),
            row("a", 3.0, 50.0, 50.0),
        ];
        let analysis = analyze(&rows, &targets(&["a", "b"]), &ThresholdConfig::default(), false);

        let order: Vec<(&str, f64)> = analysis
            .findings
            .iter()
            .map(|f| (f.host.as_str(), f.max_cpu))
            .collect();
        assert_eq!(order, vec![("a", 1.0), ("a", 3.0), ("b", 1.0), ("b", 2.0)]);
        assert_eq!(analysis.found_count, 2);
    }

    #[test]
    fn test_analyze_lexicographic_not_numeric_order() {
        let rows = vec![row("10.0.0.9", 1.0, 1.0, 1.0), row("10.0.0.10", 1.0, 1.0, 1.0)];
        let analysis = analyze(
            &rows,
            &targets(&["10.0.0.9", "10.0.0.10"]),
            &ThresholdConfig::default(),
            false,
        );
        assert_eq!(analysis.findings[0].host, "10.0.0.10");
        assert_eq!(analysis.findings[1].host, "10.0.0.9");
    }

    #[test]
    fn test_analyze_no_matches() {
        let analysis = analyze(
            &sample_rows(),
            &targets(&["192.168.1.1"]),
            &ThresholdConfig::default(),
            true,
        );
        assert!(analysis.findings.is_empty());
        assert!(analysis.no_rows_matched());
        assert_eq!(analysis.missing, vec!["192.168.1.1"]);
    }

    #[test]
    fn test_analyze_empty_targets() {
        let analysis = analyze(&sample_rows(), &BTreeSet::new(), &ThresholdConfig::default(), true);
        assert!(analysis.findings.is_empty());
        assert!(analysis.missing.is_empty());
        assert_eq!(analysis.target_count, 0);
        assert!(analysis.no_rows_matched());
    }

    #[test]
    fn test_analyze_properties_hold() {
        let rows = vec![
            row("x", 9.0, 30.0, 30.0),
            row("y", 30.0, 30.0, 30.0),
            row("z", 30.0, 19.0, 30.0),
            row("w", 1.0, 1.0, 1.0),
        ];
        let wanted = targets(&["x", "y", "z", "q"]);
        let thresholds = ThresholdConfig::default();

        let filtered = analyze(&rows, &wanted, &thresholds, false);
        assert!(filtered.findings.iter().all(|f| wanted.contains(&f.host)));
        assert!(filtered.findings.iter().all(|f| !f.trigger.is_empty()));

        let everything = analyze(&rows, &wanted, &thresholds, true);
        assert_eq!(everything.findings.len(), 3);
        assert_eq!(everything.missing, vec!["q"]);
    }
}
