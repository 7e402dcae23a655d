//! # Domain Types
//!
//! Data structures shared between the execution relay and the tool host.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Which transport the MCP service is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Local pipe transport over stdin/stdout.
    #[default]
    Stdio,
    /// Streamable HTTP bound to `server.host:server.port`.
    Http,
}

/// How a script that exits with a failure status is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Return stdout no matter what the exit status was.
    #[default]
    StdoutOnly,
    /// Turn a non-zero exit into an error carrying the exit code and both streams.
    Strict,
}

/// A single call to the relay. Lives only for the duration of that call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub code: String,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Everything captured from one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub duration: Duration,
    /// Set only when the script file was kept on disk.
    pub retained_script: Option<PathBuf>,
}
