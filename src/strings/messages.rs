//! # Messages
//!
//! Text that reaches the remote caller: tool metadata, server instructions
//! and the explanations attached to failed runs.

pub const TOOL_NAME: &str = "run_python";

pub fn server_instructions(timeout_secs: u64) -> String {
    format!(
        "Runs Python snippets through the `{TOOL_NAME}` tool and returns what they print to stdout. \
         Each run gets a fresh interpreter and is killed after {timeout_secs}s."
    )
}

pub fn execution_timed_out(seconds: u64) -> String {
    format!("Execution timed out after {seconds}s and was terminated.")
}

pub fn script_failed(code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };
    let mut text = format!("[Script failed: {status}]");
    if !stdout.is_empty() {
        text.push_str("\n--- STDOUT ---\n");
        text.push_str(stdout);
    }
    if !stderr.is_empty() {
        text.push_str("\n--- STDERR ---\n");
        text.push_str(stderr);
    }
    text
}
