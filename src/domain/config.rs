//! # Configuration
//!
//! Manages the loading and parsing of the server's configuration file (`config.yaml`).
//! Every section is optional; a missing file means built-in defaults.
//! Precedence, lowest first: defaults, file, environment (`PORT`), CLI flags.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::paths;
use crate::domain::types::{FailureMode, Transport};
use crate::strings::logs;

/// Environment variable selecting the HTTP bind port.
pub const PORT_ENV: &str = "PORT";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
    pub resources: Vec<StaticResource>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub transport: Transport,
    pub host: String,
    pub port: u16,
    /// Mount point of the streamable HTTP endpoint.
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "python-runner".to_string(),
            transport: Transport::Stdio,
            host: "0.0.0.0".to_string(),
            port: default_port(),
            path: "/mcp".to_string(),
        }
    }
}

fn default_port() -> u16 {
    8001
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    pub interpreter: String,
    pub interpreter_args: Vec<String>,
    /// Suffix of the script file, leading dot included.
    pub extension: String,
    pub timeout_secs: u64,
    /// Keep the script file on disk after the run instead of deleting it.
    pub retain_scripts: bool,
    pub failure_mode: FailureMode,
    /// Where script files are created. Defaults to the system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            interpreter_args: Vec::new(),
            extension: ".py".to_string(),
            timeout_secs: 30,
            retain_scripts: false,
            failure_mode: FailureMode::StdoutOnly,
            scratch_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Directory for the log file. `None` (the default) disables file logging,
    /// so a bare start needs nothing from the working directory.
    pub directory: Option<PathBuf>,
    pub file: String,
    /// Mirror logs to stderr.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,rmcp=warn,hyper=warn".to_string(),
            directory: None,
            file: paths::LOG_FILE.to_string(),
            console: true,
        }
    }
}

/// A fixed text document served under an MCP resource URI.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StaticResource {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub text: String,
}

impl AppConfig {
    /// Loads the config from `path`.
    ///
    /// When `path` is `None` the default `data/config.yaml` is tried and
    /// silently skipped if absent. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(paths::config_rel()), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| logs::config_read_error(&path.display().to_string()))?;
        Self::from_yaml(&content)
            .with_context(|| logs::config_parse_error(&path.display().to_string()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document parses to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies environment overrides. Takes a lookup function so tests don't
    /// have to touch the process environment.
    ///
    /// `PORT` only configures the HTTP listener; under stdio it is ignored,
    /// malformed or not, since hosts often export it for unrelated reasons.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.server.transport != Transport::Http {
            return Ok(());
        }
        if let Some(raw) = lookup(PORT_ENV) {
            self.server.port = raw
                .trim()
                .parse()
                .with_context(|| logs::invalid_port_env(&raw))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let exec = &self.execution;
        if exec.timeout_secs == 0 {
            bail!("execution.timeout_secs must be greater than zero");
        }
        if exec.interpreter.trim().is_empty() {
            bail!("execution.interpreter must not be empty");
        }
        if !exec.extension.starts_with('.') {
            bail!(
                "execution.extension must start with '.', got {:?}",
                exec.extension
            );
        }
        if !self.server.path.starts_with('/') {
            bail!("server.path must start with '/', got {:?}", self.server.path);
        }
        for resource in &self.resources {
            if resource.uri.trim().is_empty() {
                bail!("resource '{}' has an empty uri", resource.name);
            }
        }
        Ok(())
    }
}
