//! # Paths
//!
//! Centralized definitions for where the server looks for its files on disk.

pub const DATA_DIR: &str = "data";
pub const CONFIG_FILE: &str = "config.yaml";
pub const LOG_FILE: &str = "python-runner.log";

/// Prefix given to every ephemeral script file.
pub const SCRIPT_PREFIX: &str = "python-runner-";

/// Returns the relative path to the default config file (e.g. "data/config.yaml")
pub fn config_rel() -> String {
    format!("{}/{}", DATA_DIR, CONFIG_FILE)
}
