use std::fmt;

use super::LABEL_WIDTH;
use crate::presentation::formatters::number::{
    format_avg_days, format_days, format_percent, format_score, format_signed,
};
use crate::presentation::view_models::{
    CreateView, RecommendationViewModel, ShelfLifeViewModel, ViewMode,
};

impl CreateView for RecommendationViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(RecommendationView { data: self, mode })
    }
}

struct RecommendationView<'a> {
    data: &'a RecommendationViewModel,
    mode: ViewMode,
}

impl<'a> RecommendationView<'a> {
    /// Present fields only; an absent value has no line at all
    fn fields(&self) -> Vec<(&'static str, String)> {
        let result = &self.data.result;
        let mut fields = Vec::new();

        if let Some(loss) = result.loss_percentage {
            fields.push(("Loss percentage", format_percent(loss)));
        }
        if let Some(risk) = result.risk_score {
            fields.push(("Risk score", format_score(risk)));
        }
        if let Some(days) = result.days_in_stock {
            fields.push(("Days in stock", format_days(days)));
        }
        if let Some(days) = result.avg_shelf_life {
            fields.push(("Avg shelf life", format_days(days)));
        }
        if let Some(days) = result.adjusted_shelf_life {
            let value = match self.data.shelf_life_delta {
                Some(delta) if delta != 0 => {
                    format!("{} ({})", format_days(days), format_signed(delta))
                }
                _ => format_days(days),
            };
            fields.push(("Adjusted shelf life", value));
        }
        if let Some(explanation) = &result.weather_explanation {
            fields.push(("Weather", explanation.clone()));
        }
        fields
    }
}

impl<'a> fmt::Display for RecommendationView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", self.data.result.recommendation_text);
        }

        writeln!(
            f,
            "{} ({}) in {}, arriving {}",
            self.data.item,
            self.data.category,
            self.data.city,
            self.data.arrival_date.format("%Y-%m-%d")
        )?;
        writeln!(f)?;
        writeln!(f, "  {}", self.data.result.recommendation_text)?;

        let fields = self.fields();
        if !fields.is_empty() {
            writeln!(f)?;
        }
        for (label, value) in fields {
            writeln!(f, "  {:<width$}{}", label, value, width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

impl CreateView for ShelfLifeViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ShelfLifeView { data: self, mode })
    }
}

struct ShelfLifeView<'a> {
    data: &'a ShelfLifeViewModel,
    mode: ViewMode,
}

impl<'a> fmt::Display for ShelfLifeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            return writeln!(
                f,
                "{}\t{:.1}\t{}",
                self.data.item, self.data.avg_shelf_life, self.data.commonly_wasted
            );
        }

        writeln!(
            f,
            "{}: average shelf life {}",
            self.data.item,
            format_avg_days(self.data.avg_shelf_life)
        )?;
        if self.data.commonly_wasted {
            writeln!(f, "  Listed in global waste statistics")?;
        } else {
            writeln!(f, "  Not in global waste statistics")?;
        }
        Ok(())
    }
}
