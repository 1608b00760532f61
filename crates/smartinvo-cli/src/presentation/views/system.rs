use std::fmt;

use super::LABEL_WIDTH;
use crate::presentation::view_models::{
    ConfigInitViewModel, ConfigViewModel, CreateView, HealthViewModel, ModelViewModel, ViewMode,
    WeatherViewModel,
};
use smartinvo_types::DailyForecast;

impl CreateView for ModelViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ModelView { data: self })
    }
}

struct ModelView<'a> {
    data: &'a ModelViewModel,
}

impl<'a> fmt::Display for ModelView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.data.info;
        writeln!(f, "Model: {}", info.model)?;
        writeln!(f, "  {:<width$}{:.2}", "Accuracy (R²)", info.accuracy, width = LABEL_WIDTH)?;
        if !info.details.is_empty() {
            writeln!(f, "  {:<width$}{}", "Details", info.details, width = LABEL_WIDTH)?;
        }
        if let Some(conclusion) = &info.conclusion {
            writeln!(f, "  {:<width$}{}", "Conclusion", conclusion, width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

impl CreateView for WeatherViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(WeatherView { data: self, mode })
    }
}

struct WeatherView<'a> {
    data: &'a WeatherViewModel,
    mode: ViewMode,
}

impl<'a> WeatherView<'a> {
    fn day_line(day: &DailyForecast) -> String {
        let mut parts = vec![day.date.clone().unwrap_or_else(|| "(undated)".to_string())];
        if let Some(condition) = &day.condition {
            parts.push(condition.clone());
        }
        if let Some(avg) = day.avg_temp_c {
            parts.push(format!("avg {:.1}°C", avg));
        }
        if let Some(min) = day.min_temp_c {
            parts.push(format!("min {:.1}°C", min));
        }
        if let Some(max) = day.max_temp_c {
            parts.push(format!("max {:.1}°C", max));
        }
        if let Some(rain) = day.chance_of_rain {
            parts.push(format!("rain {:.0}%", rain));
        }
        if let Some(humidity) = day.avg_humidity {
            parts.push(format!("humidity {:.0}%", humidity));
        }
        parts.join("  ")
    }
}

impl<'a> fmt::Display for WeatherView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.data.report;
        if self.mode == ViewMode::Minimal {
            for day in &report.forecast {
                writeln!(f, "{}", Self::day_line(day))?;
            }
            return Ok(());
        }

        if report.country.is_empty() || report.country == report.location {
            writeln!(f, "Weather for {}", report.location)?;
        } else {
            writeln!(f, "Weather for {}, {}", report.location, report.country)?;
        }

        if report.forecast.is_empty() {
            return writeln!(f, "  No forecast available");
        }
        for day in &report.forecast {
            writeln!(f, "  {}", Self::day_line(day))?;
        }
        Ok(())
    }
}

impl CreateView for HealthViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(HealthView { data: self })
    }
}

struct HealthView<'a> {
    data: &'a HealthViewModel,
}

impl<'a> fmt::Display for HealthView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.data.message)?;
        writeln!(f, "  {}", self.data.api_url)
    }
}

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ConfigView { data: self })
    }
}

struct ConfigView<'a> {
    data: &'a ConfigViewModel,
}

impl<'a> fmt::Display for ConfigView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.data.config;
        if self.data.exists {
            writeln!(f, "Config file: {}", self.data.path)?;
        } else {
            writeln!(f, "Config file: {} (not created, using defaults)", self.data.path)?;
        }

        let mut rows = vec![
            ("api_url", config.api_url.clone()),
            ("request_timeout_secs", config.request_timeout_secs.to_string()),
        ];
        if let Some(city) = &config.default_city {
            rows.push(("default_city", city.clone()));
        }
        rows.push(("typewriter_ms", config.animation.typewriter_ms.to_string()));
        rows.push(("progress_ms", config.animation.progress_ms.to_string()));
        rows.push(("step_ms", config.animation.step_ms.to_string()));

        for (key, value) in rows {
            writeln!(f, "  {:<width$}{}", key, value, width = LABEL_WIDTH + 2)?;
        }
        Ok(())
    }
}

impl CreateView for ConfigInitViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(ConfigInitView { data: self })
    }
}

struct ConfigInitView<'a> {
    data: &'a ConfigInitViewModel,
}

impl<'a> fmt::Display for ConfigInitView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.written {
            writeln!(f, "Edit {} to point at your service.", self.data.path)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_types::{ModelInfo, WeatherReport};

    #[test]
    fn test_model_view() {
        let vm = ModelViewModel {
            info: ModelInfo {
                model: "RandomForestRegressor".to_string(),
                accuracy: 0.87,
                details: String::new(),
                conclusion: Some("Reliable for perishables".to_string()),
            },
        };
        insta::assert_snapshot!(vm.create_view(ViewMode::Standard).to_string(), @r"
Model: RandomForestRegressor
  Accuracy (R²)       0.87
  Conclusion          Reliable for perishables
");
    }

    #[test]
    fn test_partial_forecast_day() {
        let vm = WeatherViewModel {
            report: WeatherReport {
                location: "Singapore".to_string(),
                country: "Singapore".to_string(),
                forecast: vec![
                    DailyForecast {
                        date: Some("2024-03-01".to_string()),
                        condition: Some("Patchy rain".to_string()),
                        avg_temp_c: Some(28.4),
                        chance_of_rain: Some(80.0),
                        ..DailyForecast::default()
                    },
                    DailyForecast {
                        avg_temp_c: Some(27.9),
                        ..DailyForecast::default()
                    },
                ],
            },
        };
        insta::assert_snapshot!(vm.create_view(ViewMode::Standard).to_string(), @r"
Weather for Singapore
  2024-03-01  Patchy rain  avg 28.4°C  rain 80%
  (undated)  avg 27.9°C
");
    }

    #[test]
    fn test_empty_forecast() {
        let vm = WeatherViewModel {
            report: WeatherReport {
                location: "Atlantis".to_string(),
                country: String::new(),
                forecast: Vec::new(),
            },
        };
        assert_eq!(
            vm.create_view(ViewMode::Standard).to_string(),
            "Weather for Atlantis\n  No forecast available\n"
        );
    }
}
