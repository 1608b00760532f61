use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use smartinvo_backend::normalize_base_url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const CONFIG_ENV: &str = "SMARTINVO_CONFIG";
pub const API_URL_ENV: &str = "SMARTINVO_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SMARTINVO_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory (recommended default)
/// 4. ~/.smartinvo/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    resolve_config_path_from(explicit_path, std::env::var(CONFIG_ENV).ok())
}

fn resolve_config_path_from(explicit_path: Option<&str>, env_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Some(env_path) = env_path.filter(|p| !p.trim().is_empty()) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("smartinvo").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".smartinvo").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Animation cadences in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub typewriter_ms: u64,
    pub progress_ms: u64,
    pub step_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            typewriter_ms: 25,
            progress_ms: 20,
            step_ms: 1000,
        }
    }
}

impl AnimationConfig {
    pub fn typewriter(&self) -> Duration {
        Duration::from_millis(self.typewriter_ms.max(1))
    }

    pub fn progress(&self) -> Duration {
        Duration::from_millis(self.progress_ms.max(1))
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 15,
            default_city: None,
            animation: AnimationConfig::default(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        let config_path = resolve_config_path(explicit_path)?;
        Self::load_from(&config_path)
    }

    /// A missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the URL override chain and freeze the result.
    ///
    /// Priority: `flag` > SMARTINVO_API_URL > file value > default.
    pub fn resolve(self, flag: Option<&str>) -> Result<Arc<Config>> {
        self.resolve_with_env(flag, std::env::var(API_URL_ENV).ok())
            .map(Arc::new)
    }

    fn resolve_with_env(mut self, flag: Option<&str>, env_url: Option<String>) -> Result<Config> {
        let raw = flag
            .map(str::to_string)
            .or_else(|| env_url.filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| self.api_url.clone());

        self.api_url = normalize_base_url(&raw).map_err(|e| Error::Config(e.to_string()))?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_config_path_from(Some("/tmp/a.toml"), Some("/tmp/b.toml".into())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/a.toml"));

        let path = resolve_config_path_from(None, Some("/tmp/b.toml".into())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/b.toml"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.animation.step(), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_and_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "api_url = \"https://api.example.com/\"\n[animation]\nstep_ms = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://api.example.com/");
        assert_eq!(config.animation.step_ms, 10);
        assert_eq!(config.animation.typewriter_ms, 25);

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_url_priority() {
        let file = Config {
            api_url: "http://file:1/".to_string(),
            ..Config::default()
        };

        let resolved = file
            .clone()
            .resolve_with_env(Some("http://flag:1///"), Some("http://env:1".into()))
            .unwrap();
        assert_eq!(resolved.api_url, "http://flag:1");

        let resolved = file
            .clone()
            .resolve_with_env(None, Some("http://env:1/".into()))
            .unwrap();
        assert_eq!(resolved.api_url, "http://env:1");

        let resolved = file.clone().resolve_with_env(None, Some("  ".into())).unwrap();
        assert_eq!(resolved.api_url, "http://file:1");

        let resolved = Config::default().resolve_with_env(None, None).unwrap();
        assert_eq!(resolved.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = Config::default()
            .resolve_with_env(Some("not a url"), None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
