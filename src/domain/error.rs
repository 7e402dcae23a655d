//! # Execution Errors
//!
//! Typed failures of the execution relay. Nothing here is retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The interpreter was still running when the wall-clock bound elapsed.
    #[error("Execution timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Only produced when the failure mode is `strict`.
    #[error("{}", describe_exit(.code))]
    NonZeroExit {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to start interpreter '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    /// Creating, writing, persisting or removing the script file failed.
    #[error("Script file error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Script exited with status {code}"),
        None => "Script was terminated by a signal".to_string(),
    }
}

impl ExecutionError {
    /// Timeouts and failing scripts are the caller's problem; everything else
    /// is a fault of the host.
    pub fn is_script_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NonZeroExit { .. })
    }
}
