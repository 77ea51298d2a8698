/// Format a percentage value with a fixed number of decimals and a `%`
/// suffix.
///
/// # Examples
///
/// ```
/// use usage_core::formatting::format_percent;
///
/// assert_eq!(format_percent(5.0, 2), "5.00%");
/// assert_eq!(format_percent(33.333, 1), "33.3%");
/// assert_eq!(format_percent(f64::NAN, 2), "NaN%");
/// ```
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.prec$}%", value, prec = decimals)
}

/// Calculate `(part / whole) * 100`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use usage_core::formatting::percentage;
///
/// assert!((percentage(1, 4) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(3, 0), 0.0);
/// ```
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

// ── Tests ──────────────────────────────────────────────────────────────────────
