use serde::Serialize;
use smartinvo_runtime::Config;
use smartinvo_types::{ModelInfo, WeatherReport};

#[derive(Debug, Clone, Serialize)]
pub struct ModelViewModel {
    #[serde(flatten)]
    pub info: ModelInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherViewModel {
    #[serde(flatten)]
    pub report: WeatherReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthViewModel {
    pub api_url: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigViewModel {
    pub path: String,
    pub exists: bool,
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInitViewModel {
    pub path: String,
    /// False when an existing file was left alone
    pub written: bool,
}
