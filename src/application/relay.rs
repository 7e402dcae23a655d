//! # Code Execution Relay
//!
//! Turns a code string into one bounded interpreter run:
//! dedent, write to a uniquely named temp file, spawn the interpreter on it,
//! wait with a hard wall-clock timeout, hand back what it printed.
//!
//! Every call owns its own file and its own child process, so concurrent
//! calls share nothing but the temp directory.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tempfile::TempPath;
use tokio::process::Command;

use crate::application::dedent::dedent;
use crate::domain::config::ExecutionConfig;
use crate::domain::error::{ExecutionError, Result};
use crate::domain::paths;
use crate::domain::traits::CodeExecutor;
use crate::domain::types::{ExecutionOutcome, ExecutionRequest, FailureMode};
use crate::strings::logs;

/// Runs snippets through an external interpreter.
#[derive(Debug, Clone)]
pub struct CodeRelay {
    config: ExecutionConfig,
}

impl CodeRelay {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Writes the dedented code to a fresh script file.
    ///
    /// The returned guard deletes the file when dropped, which covers every
    /// early return below.
    fn write_script(&self, code: &str) -> Result<TempPath> {
        let mut builder = tempfile::Builder::new();
        builder
            .prefix(paths::SCRIPT_PREFIX)
            .suffix(&self.config.extension);

        let mut file = match &self.config.scratch_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };

        file.write_all(dedent(code).as_bytes())?;
        file.flush()?;

        // Close the handle; some platforms refuse to run an open file.
        Ok(file.into_temp_path())
    }

    /// Deletes or persists the script according to `retain_scripts`.
    fn release_script(&self, script: TempPath) -> Result<Option<PathBuf>> {
        if self.config.retain_scripts {
            let path = script.keep().map_err(|e| e.error)?;
            tracing::debug!("{}", logs::script_retained(&path.display().to_string()));
            Ok(Some(path))
        } else {
            script.close()?;
            Ok(None)
        }
    }

    fn command(&self, script: &TempPath) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.args(&self.config.interpreter_args)
            .arg(script.as_os_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CodeExecutor for CodeRelay {
    async fn run(&self, request: ExecutionRequest) -> Result<ExecutionOutcome> {
        let script = self.write_script(&request.code)?;
        tracing::debug!(
            "{}",
            logs::running_script(
                request.code.len(),
                &self.config.interpreter,
                &script.display().to_string()
            )
        );

        let started = Instant::now();
        let child = self.command(&script).spawn().map_err(|source| {
            ExecutionError::Spawn {
                interpreter: self.config.interpreter.clone(),
                source,
            }
        })?;

        // Dropping the wait future on timeout drops the child, and
        // `kill_on_drop` takes it down with it.
        let output = match tokio::time::timeout(self.timeout(), child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                tracing::warn!("{}", logs::execution_timed_out(self.config.timeout_secs));
                if let Err(e) = self.release_script(script) {
                    tracing::warn!("{}", logs::release_after_timeout_fail(&e.to_string()));
                }
                return Err(ExecutionError::Timeout {
                    seconds: self.config.timeout_secs,
                });
            }
        };
        let duration = started.elapsed();
        let retained_script = self.release_script(script)?;

        let outcome = ExecutionOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            success: output.status.success(),
            duration,
            retained_script,
        };

        tracing::info!(
            exit_code = ?outcome.exit_code,
            elapsed_ms = outcome.duration.as_millis() as u64,
            stdout_bytes = outcome.stdout.len(),
            retained = ?outcome.retained_script,
            "{}",
            logs::EXECUTION_FINISHED
        );

        if !outcome.success {
            tracing::warn!(
                "{}",
                logs::script_failed(&output.status.to_string(), outcome.stderr.trim_end())
            );
            if self.config.failure_mode == FailureMode::Strict {
                return Err(ExecutionError::NonZeroExit {
                    code: outcome.exit_code,
                    stdout: outcome.stdout,
                    stderr: outcome.stderr,
                });
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn shell_relay(dir: &TempDir) -> CodeRelay {
        CodeRelay::new(ExecutionConfig {
            interpreter: "sh".to_string(),
            extension: ".sh".to_string(),
            timeout_secs: 10,
            scratch_dir: Some(dir.path().to_path_buf()),
            ..ExecutionConfig::default()
        })
    }

    fn files_in(dir: &TempDir) -> Vec<PathBuf> {
        std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    fn python_available() -> bool {
        std::process::Command::new("python3")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_returns_stdout_verbatim() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        let stdout = relay.execute("echo hello").await.unwrap();
        assert_eq!(stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_indented_code_runs_at_top_level() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        let indented = relay.execute("    x=1\n    echo $x").await.unwrap();
        let flat = relay.execute("x=1\necho $x").await.unwrap();
        assert_eq!(indented, "1\n");
        assert_eq!(indented, flat);
    }

    #[tokio::test]
    async fn test_repeated_calls_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        let first = relay.execute("echo same").await.unwrap();
        let second = relay.execute("echo same").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_their_own_output() {
        let dir = TempDir::new().unwrap();
        let relay = Arc::new(shell_relay(&dir));

        let calls = (0..8).map(|i| {
            let relay = relay.clone();
            async move { relay.execute(&format!("sleep 0.1\necho task-{i}")).await }
        });
        let results = join_all(calls).await;

        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), format!("task-{i}\n"));
        }
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_timeout_kills_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let relay = CodeRelay::new(ExecutionConfig {
            timeout_secs: 1,
            ..shell_relay(&dir).config().clone()
        });

        let started = Instant::now();
        let err = relay.execute("sleep 30").await.unwrap_err();
        assert!(matches!(err, ExecutionError::Timeout { seconds: 1 }));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_script_removed_after_run() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        let outcome = relay.run(ExecutionRequest::new("echo gone")).await.unwrap();
        assert_eq!(outcome.retained_script, None);
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_script_removed_after_failed_run() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        relay.execute("exit 2").await.unwrap();
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_retained_script_holds_dedented_code() {
        let dir = TempDir::new().unwrap();
        let relay = CodeRelay::new(ExecutionConfig {
            retain_scripts: true,
            ..shell_relay(&dir).config().clone()
        });

        let code = "    echo kept\n";
        let outcome = relay.run(ExecutionRequest::new(code)).await.unwrap();
        let path = outcome.retained_script.expect("script should be retained");

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("sh"));
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(paths::SCRIPT_PREFIX)
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo kept\n");
        assert_eq!(files_in(&dir), vec![path]);
    }

    #[tokio::test]
    async fn test_stdout_only_mode_hides_failure() {
        let dir = TempDir::new().unwrap();
        let relay = shell_relay(&dir);
        let outcome = relay
            .run(ExecutionRequest::new("echo partial\necho oops 1>&2\nexit 3"))
            .await
            .unwrap();
        assert_eq!(outcome.stdout, "partial\n");
        assert_eq!(outcome.stderr, "oops\n");
        assert_eq!(outcome.exit_code, Some(3));
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_strict_mode_reports_failure() {
        let dir = TempDir::new().unwrap();
        let relay = CodeRelay::new(ExecutionConfig {
            failure_mode: FailureMode::Strict,
            ..shell_relay(&dir).config().clone()
        });

        match relay.execute("echo partial\necho oops 1>&2\nexit 3").await {
            Err(ExecutionError::NonZeroExit {
                code,
                stdout,
                stderr,
            }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }

        assert_eq!(relay.execute("echo fine").await.unwrap(), "fine\n");
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let relay = CodeRelay::new(ExecutionConfig {
            interpreter: "definitely-not-an-interpreter-xyz".to_string(),
            ..shell_relay(&dir).config().clone()
        });

        let err = relay.execute("echo hi").await.unwrap_err();
        assert!(matches!(err, ExecutionError::Spawn { .. }));
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_python_examples() {
        if !python_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let relay = CodeRelay::new(ExecutionConfig {
            timeout_secs: 2,
            scratch_dir: Some(dir.path().to_path_buf()),
            ..ExecutionConfig::default()
        });

        assert_eq!(relay.execute("print('hello')").await.unwrap(), "hello\n");
        assert_eq!(
            relay.execute("    x = 1\n    print(x)").await.unwrap(),
            "1\n"
        );
        let err = relay
            .execute("import time; time.sleep(60)")
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Timeout { .. }));
    }
}
