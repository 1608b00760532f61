use std::fmt;

use super::stats::row_summary;
use crate::presentation::formatters::number::format_compact;
use crate::presentation::view_models::{CreateView, TraceViewModel, ViewMode};

impl CreateView for TraceViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(TraceView { data: self, mode })
    }
}

struct TraceView<'a> {
    data: &'a TraceViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for TraceView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.data.steps {
            if self.mode == ViewMode::Minimal {
                writeln!(f, "{}", step.step)?;
                continue;
            }

            writeln!(f, "{}", header(step.position, &step.step))?;
            writeln!(f, "   {}", step.description)?;
            if let Some(rows) = step.rows {
                writeln!(f, "   {}", rows_label(rows, self.mode))?;
            }
            for row in &step.top {
                writeln!(f, "   - {}", row_summary(row))?;
            }
        }
        Ok(())
    }
}

/// `1. load_data`
pub(crate) fn header(position: usize, step: &str) -> String {
    format!("{}. {}", position, step)
}

pub(crate) fn rows_label(rows: u64, mode: ViewMode) -> String {
    match mode {
        ViewMode::Verbose => format!("{} rows", rows),
        _ => format!("{} rows", format_compact(rows)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::{TraceStepViewModel, WasteRowViewModel};

    fn trace() -> TraceViewModel {
        TraceViewModel {
            steps: vec![
                TraceStepViewModel {
                    position: 1,
                    step: "load_data".to_string(),
                    description: "Loaded waste records".to_string(),
                    rows: Some(1200),
                    top: Vec::new(),
                },
                TraceStepViewModel {
                    position: 2,
                    step: "top_waste_items".to_string(),
                    description: "Ranked commodities".to_string(),
                    rows: None,
                    top: vec![WasteRowViewModel {
                        name: "Tomatoes".to_string(),
                        country: None,
                        loss_percentage: 31.2,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_standard_trace() {
        let output = trace().create_view(ViewMode::Standard).to_string();
        insta::assert_snapshot!(output, @r"
1. load_data
   Loaded waste records
   1.2k rows
2. top_waste_items
   Ranked commodities
   - Tomatoes 31.2%
");
    }

    #[test]
    fn test_minimal_and_verbose() {
        let vm = trace();
        assert_eq!(
            vm.create_view(ViewMode::Minimal).to_string(),
            "load_data\ntop_waste_items\n"
        );
        assert!(vm.create_view(ViewMode::Verbose).to_string().contains("1200 rows"));
    }
}
