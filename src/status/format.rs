//! Metric value formatting

use crate::domain::TriggerMetric;

const RATE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a percentage with no fractional digits
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Format a byte rate with decimal units, e.g. `1.5 MB/s`
pub fn format_rate(bytes_per_sec: f64) -> String {
    let mut value = if bytes_per_sec.is_finite() {
        bytes_per_sec.max(0.0)
    } else {
        0.0
    };
    let mut unit = 0;

    while value >= 1000.0 && unit < RATE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    // Rounding can carry into the next unit
    let scale = if unit == 0 { 1.0 } else { 10.0 };
    if (value * scale).round() / scale >= 1000.0 && unit < RATE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{:.0} {}/s", value, RATE_UNITS[unit])
    } else {
        format!("{:.1} {}/s", value, RATE_UNITS[unit])
    }
}

/// Format a metric's display value
pub fn format_value(metric: TriggerMetric, value: f64) -> String {
    if metric.is_rate() {
        format_rate(value)
    } else {
        format_percent(value)
    }
}
