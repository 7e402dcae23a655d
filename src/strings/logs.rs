pub const STARTING: &str = "Starting python-runner...";
pub const SHUTDOWN: &str = "Shutting down...";
pub const STDIO_CLOSED: &str = "Stdio peer disconnected";
pub const EXECUTION_FINISHED: &str = "Execution finished";

pub fn config_loaded(source: &str) -> String {
    format!("Loaded configuration from {source}")
}

pub fn config_read_error(path: &str) -> String {
    format!("Failed to read config file {path}")
}

pub fn config_parse_error(path: &str) -> String {
    format!("Failed to parse YAML in {path}")
}

pub fn invalid_port_env(raw: &str) -> String {
    format!("PORT must be a port number, got {raw:?}")
}

pub fn log_dir_create_error(dir: &str) -> String {
    format!("Failed to create log directory {dir}")
}

pub fn log_file_open_error(path: &str) -> String {
    format!("Failed to open log file {path}")
}

pub fn file_logging_disabled(err: &str) -> String {
    format!("File logging disabled, continuing on stderr only: {err}")
}

pub fn execution_settings(interpreter: &str, timeout_secs: u64, retain: bool) -> String {
    format!("Interpreter '{interpreter}', timeout {timeout_secs}s, retain scripts: {retain}")
}

pub fn serving_stdio(name: &str) -> String {
    format!("Serving '{name}' over stdio")
}

pub fn serving_http(name: &str, addr: &str, path: &str) -> String {
    format!("Serving '{name}' over streamable HTTP at http://{addr}{path}")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn tool_call(name: &str, code_len: usize) -> String {
    format!("Tool call {name} ({code_len} bytes of code)")
}

pub fn tool_fault(name: &str, err: &str) -> String {
    format!("Tool {name} failed: {err}")
}

pub fn running_script(code_len: usize, interpreter: &str, script: &str) -> String {
    format!("Running {code_len} bytes of code with '{interpreter}' from {script}")
}

pub fn script_retained(path: &str) -> String {
    format!("Retained script file {path}")
}

pub fn execution_timed_out(seconds: u64) -> String {
    format!("Execution exceeded {seconds}s, interpreter killed")
}

pub fn release_after_timeout_fail(err: &str) -> String {
    format!("Failed to release script after timeout: {err}")
}

pub fn script_failed(status: &str, stderr: &str) -> String {
    format!("Script failed ({status}): {stderr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_log_lines() {
        assert_eq!(
            running_script(12, "python3", "/tmp/python-runner-a.py"),
            "Running 12 bytes of code with 'python3' from /tmp/python-runner-a.py"
        );
        assert_eq!(execution_timed_out(30), "Execution exceeded 30s, interpreter killed");
        assert_eq!(
            script_failed("exit status: 1", "NameError"),
            "Script failed (exit status: 1): NameError"
        );
    }
}
