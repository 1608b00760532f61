//! Horizontal text bar charts for waste statistics.

use super::number::format_percent;

pub struct ChartRow<'a> {
    pub label: &'a str,
    pub value: f64,
}

impl<'a> ChartRow<'a> {
    pub fn new(label: &'a str, value: f64) -> Self {
        Self { label, value }
    }
}

/// One line per row: padded label, bar scaled to the largest value, percent.
///
/// The largest value spans `width` cells; any positive value gets at least one.
pub fn bar_lines(rows: &[ChartRow<'_>], width: usize) -> Vec<String> {
    let label_width = rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows.iter().map(|row| row.value).fold(0.0_f64, f64::max);

    rows.iter()
        .map(|row| {
            let cells = bar_cells(row.value, max, width);
            let bar = "█".repeat(cells);
            let padding = " ".repeat(width - cells);
            let label_pad = " ".repeat(label_width - row.label.chars().count());
            format!(
                "{}{} {}{} {}",
                row.label,
                label_pad,
                bar,
                padding,
                format_percent(row.value)
            )
        })
        .collect()
}

/// `[██████░░░░] 950/1200`
pub fn progress_bar(current: u64, total: u64, width: usize) -> String {
    let ratio = current.min(total) as f64 / total.max(1) as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {}/{}",
        "█".repeat(filled),
        "░".repeat(width - filled),
        current,
        total
    )
}

fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let cells = (value / max * width as f64).round() as usize;
    cells.clamp(1, width)
}
