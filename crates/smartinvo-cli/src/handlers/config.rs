use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, OutputFormat, Renderer, ViewMode};
use anyhow::Result;
use smartinvo_runtime::Config;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Print the configuration commands would run with, URL overrides applied
pub fn show(path: &Path, api_url: Option<&str>, format: OutputFormat) -> Result<()> {
    let config = Config::load_from(path)?.resolve(api_url)?;
    let view_model = presenters::present_config(path, Arc::unwrap_or_clone(config));
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}

pub fn init(path: &Path, force: bool, format: OutputFormat) -> Result<()> {
    let written = if path.exists() && !force {
        false
    } else {
        Config::default().save_to(path)?;
        info!(path = %path.display(), "config written");
        true
    };

    let view_model = presenters::present_config_init(path, written);
    ConsoleRenderer::new(format, ViewMode::default()).render(view_model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        init(&path, false, OutputFormat::Json).unwrap();
        let mut config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());

        config.default_city = Some("Lagos".to_string());
        config.save_to(&path).unwrap();

        init(&path, false, OutputFormat::Json).unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().default_city.as_deref(),
            Some("Lagos")
        );

        init(&path, true, OutputFormat::Json).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().default_city, None);
    }
}
