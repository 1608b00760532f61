use serde::{Deserialize, Serialize};

/// Three-day forecast for a city, as relayed by the service.
///
/// The upstream provider may omit any per-day value, and returns an empty
/// forecast when it is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temp_c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp_c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp_c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance_of_rain: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_humidity: Option<f64>,
}
