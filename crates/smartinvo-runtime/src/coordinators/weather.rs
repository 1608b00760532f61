use smartinvo_backend::Backend;
use smartinvo_types::WeatherReport;
use std::sync::Arc;

use crate::Result;

/// On-demand forecast query for a city.
pub struct WeatherLookup {
    backend: Arc<dyn Backend>,
}

impl WeatherLookup {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Blank input is a no-op returning `None`
    pub async fn lookup(&self, city: &str) -> Result<Option<WeatherReport>> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.backend.weather(city).await?))
    }
}
