/// One decimal, the precision the service reports percentages with
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Average shelf life is fractional (e.g. 7.0 or 5.5 days)
pub fn format_avg_days(days: f64) -> String {
    format!("{:.1} days", days)
}

pub fn format_signed(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

pub fn format_compact(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
