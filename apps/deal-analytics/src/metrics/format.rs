//! Formatting utilities for metrics display.

/// Format a monetary amount with 2 decimal places.
#[must_use]
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a value already expressed in percent.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Format an optional ratio, "N/A" when not applicable.
#[must_use]
pub fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// Format a profit factor, which may be infinite.
#[must_use]
pub fn format_profit_factor(value: f64) -> String {
    if value.is_infinite() && value > 0.0 {
        "∞".to_string()
    } else {
        format!("{value:.2}")
    }
}
