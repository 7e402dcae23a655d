//! # Command Line
//!
//! Flags override whatever the config file and environment set.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::types::{FailureMode, Transport};

#[derive(Parser, Debug)]
#[command(
    name = "python-runner",
    version,
    about = "MCP server exposing a single run_python tool"
)]
pub struct Cli {
    /// Path to the YAML config file (default: data/config.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Transport to serve on
    #[arg(short, long, value_enum)]
    pub transport: Option<Transport>,

    /// Bind host for the HTTP transport
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port for the HTTP transport (overrides $PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Wall-clock limit per execution, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Interpreter command used to run scripts
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Keep script files on disk after execution
    #[arg(long)]
    pub retain_scripts: bool,

    /// Report non-zero exits as errors with stdout and stderr
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Layers environment and flags over a loaded config.
    ///
    /// The transport is settled first because it decides whether `PORT`
    /// means anything.
    pub fn configure<F>(&self, config: &mut AppConfig, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        config.apply_env(env)?;
        self.apply(config);
        Ok(())
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(timeout) = self.timeout {
            config.execution.timeout_secs = timeout;
        }
        if let Some(interpreter) = &self.interpreter {
            config.execution.interpreter = interpreter.clone();
        }
        if self.retain_scripts {
            config.execution.retain_scripts = true;
        }
        if self.strict {
            config.execution.failure_mode = FailureMode::Strict;
        }
    }
}
