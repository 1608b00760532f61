use std::fmt;

use crate::presentation::formatters::{ChartRow, bar_lines, number::format_percent};
use crate::presentation::view_models::{
    CreateView, DeletionViewModel, StatisticsViewModel, ViewMode, WasteRowViewModel,
};

const CHART_WIDTH: usize = 24;

impl CreateView for StatisticsViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(StatisticsView { data: self, mode })
    }
}

struct StatisticsView<'a> {
    data: &'a StatisticsViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for StatisticsView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            for row in self.data.global.iter().flatten() {
                writeln!(f, "global\t{}\t{:.1}", row.name, row.loss_percentage)?;
            }
            for row in self.data.store.iter().flatten() {
                writeln!(f, "{}\t{}\t{:.1}", self.data.city, row.name, row.loss_percentage)?;
            }
            return Ok(());
        }

        let limit = match self.mode {
            ViewMode::Verbose => usize::MAX,
            _ => self.data.chart_rows.max(1),
        };

        writeln!(f, "Global waste statistics")?;
        write_section(f, self.data.global.as_deref(), limit, self.mode)?;
        writeln!(f)?;
        writeln!(f, "Store statistics: {}", self.data.city)?;
        write_section(f, self.data.store.as_deref(), limit, self.mode)
    }
}

impl CreateView for DeletionViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(DeletionView { data: self, mode })
    }
}

struct DeletionView<'a> {
    data: &'a DeletionViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for DeletionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Remaining items in {}", self.data.city)?;
        write_section(f, self.data.store.as_deref(), usize::MAX, self.mode)
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    rows: Option<&[WasteRowViewModel]>,
    limit: usize,
    mode: ViewMode,
) -> fmt::Result {
    let Some(rows) = rows else {
        return writeln!(f, "  unavailable");
    };
    if rows.is_empty() {
        return writeln!(f, "  No spoiled items recorded");
    }

    let labels: Vec<String> = rows
        .iter()
        .take(limit)
        .map(|row| match (&row.country, mode) {
            (Some(country), ViewMode::Verbose) => format!("{} ({})", row.name, country),
            _ => row.name.clone(),
        })
        .collect();
    let chart: Vec<ChartRow<'_>> = labels
        .iter()
        .zip(rows)
        .map(|(label, row)| ChartRow::new(label, row.loss_percentage))
        .collect();

    for line in bar_lines(&chart, CHART_WIDTH) {
        writeln!(f, "  {}", line)?;
    }

    let hidden = rows.len().saturating_sub(limit);
    if hidden > 0 {
        writeln!(f, "  ... and {} more", hidden)?;
    }
    Ok(())
}

/// One row as a compact `name 12.3%` string
pub(crate) fn row_summary(row: &WasteRowViewModel) -> String {
    format!("{} {}", row.name, format_percent(row.loss_percentage))
}
