// ---------------------------------------------------------------------------
// KPI value formatting
// ---------------------------------------------------------------------------

/// Abbreviate a KPI value with K / M / B suffixes.
///
/// Zero and non-finite inputs render as `"0"`; the minus sign is applied
/// to the magnitude once.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 1e9 {
        format!("{sign}{:.1}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}{:.1}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}{:.1}K", abs / 1e3)
    } else {
        format!("{sign}{abs:.0}")
    }
}

/// Load factor text for a pair of RPK / ASK sums.
///
/// An ASK sum of zero reports the `"0%"` sentinel instead of dividing.
pub fn format_load_factor(rpk: f64, ask: f64) -> String {
    if ask == 0.0 {
        return "0%".to_string();
    }
    format!("{:.2}%", rpk / ask * 100.0)
}

/// Percent text with two decimals, used for per-bucket load factors.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
