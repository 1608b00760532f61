use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, ConfigInitViewModel, ConfigViewModel, Guidance, HealthViewModel,
    ModelViewModel, StatusBadge, WeatherViewModel,
};
use smartinvo_runtime::Config;
use smartinvo_types::{HealthStatus, ModelInfo, WeatherReport};
use std::path::Path;

pub fn present_model(info: ModelInfo) -> CommandResultViewModel<ModelViewModel> {
    CommandResultViewModel::new(ModelViewModel { info })
}

pub fn present_weather(report: WeatherReport) -> CommandResultViewModel<WeatherViewModel> {
    let view = CommandResultViewModel::new(WeatherViewModel { report });
    if view.content.report.forecast.is_empty() {
        let label = format!("No forecast for {}", view.content.report.location);
        return view.with_badge(StatusBadge::warning(label));
    }
    view
}

pub fn present_health(api_url: &str, status: HealthStatus) -> CommandResultViewModel<HealthViewModel> {
    CommandResultViewModel::new(HealthViewModel {
        api_url: api_url.to_string(),
        message: status.message,
    })
    .with_badge(StatusBadge::success("Service reachable"))
    .with_suggestion(Guidance::new("Model behind the recommendations").with_command(cmd::MODEL))
}

pub fn present_config(path: &Path, config: Config) -> CommandResultViewModel<ConfigViewModel> {
    let exists = path.exists();
    let view = CommandResultViewModel::new(ConfigViewModel {
        path: path.display().to_string(),
        exists,
        config,
    });
    if exists {
        return view;
    }
    view.with_suggestion(
        Guidance::new("Write these defaults to the config file").with_command(cmd::CONFIG_INIT),
    )
}

pub fn present_config_init(path: &Path, written: bool) -> CommandResultViewModel<ConfigInitViewModel> {
    let path = path.display().to_string();
    let badge = if written {
        StatusBadge::success(format!("Config written to {}", path))
    } else {
        StatusBadge::info(format!("Config already exists at {}", path))
    };

    let view = CommandResultViewModel::new(ConfigInitViewModel { path, written }).with_badge(badge);
    if written {
        view.with_suggestion(Guidance::new("Verify the service URL").with_command(cmd::HEALTH))
    } else {
        view.with_suggestion(
            Guidance::new("Overwrite with defaults").with_command(format!("{} --force", cmd::CONFIG_INIT)),
        )
        .with_suggestion(Guidance::new("Inspect the current values").with_command(cmd::CONFIG_SHOW))
    }
}
