//! TestWorld pattern for CLI integration tests.
//!
//! Provides a fluent interface for:
//! - An isolated config directory per test
//! - A stub service every command talks to
//! - Executing the `smartinvo` binary with that context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::StubServer;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use smartinvo_testing::TestWorld;
///
/// let world = TestWorld::new().unwrap();
/// let result = world.run(&["model"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    server: StubServer,
    env_vars: HashMap<String, String>,
}

impl TestWorld {
    /// Create an isolated environment backed by a fixture-answering server.
    pub fn new() -> Result<Self> {
        Self::with_server(StubServer::with_fixtures()?)
    }

    pub fn with_server(server: StubServer) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("smartinvo").join("config.toml");
        Ok(Self {
            temp_dir,
            config_path,
            server,
            env_vars: HashMap::new(),
        })
    }

    pub fn server(&self) -> &StubServer {
        &self.server
    }

    /// Path the CLI reads its config from (may not exist yet)
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a config file for the CLI to pick up.
    pub fn with_config(self, content: &str) -> Result<Self> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, content)?;
        Ok(self)
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this environment's settings.
    ///
    /// The stub server URL is passed through `SMARTINVO_API_URL` so tests can
    /// still override it with `--api-url`.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("SMARTINVO_CONFIG", &self.config_path)
            .env("SMARTINVO_API_URL", self.server.url())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `smartinvo` binary and capture its output.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("smartinvo")
            .map_err(|e| anyhow::anyhow!("Failed to find smartinvo binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run with `--format json` and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Result<(CliResult, serde_json::Value)> {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        let result = self.run(&full)?;
        let json = result.json()?;
        Ok((result, json))
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout).map_err(|e| {
            anyhow::anyhow!("stdout is not JSON ({}):\n{}", e, self.stdout)
        })
    }
}
