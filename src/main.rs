//! # Main Entry Point
//!
//! Initializes the python runner:
//! - Domain: Configuration, Types, Errors
//! - Application: Dedent, Execution Relay, Logging
//! - Infrastructure: MCP server and transports
//! - Interface: Command line
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use crate::application::relay::CodeRelay;
use crate::domain::config::AppConfig;
use crate::domain::paths;
use crate::domain::traits::CodeExecutor;
use crate::domain::types::Transport;
use crate::infrastructure::mcp::{PythonRunnerServer, transport};
use crate::interface::cli::Cli;
use crate::strings::logs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.configure(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;

    // 2. Logging Setup
    let _guard = application::logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);

    let source = match &cli.config {
        Some(path) => path.display().to_string(),
        None if Path::new(&paths::config_rel()).exists() => paths::config_rel(),
        None => "built-in defaults".to_string(),
    };
    tracing::info!("{}", logs::config_loaded(&source));

    // 3. Execution core, registered with the MCP server explicitly
    let relay = CodeRelay::new(config.execution.clone());
    let settings = relay.config();
    tracing::info!(
        "{}",
        logs::execution_settings(
            &settings.interpreter,
            settings.timeout_secs,
            settings.retain_scripts
        )
    );
    let executor: Arc<dyn CodeExecutor> = Arc::new(relay);
    let server = PythonRunnerServer::new(executor, &config);

    // 4. Transport
    match config.server.transport {
        Transport::Stdio => transport::serve_stdio(server).await?,
        Transport::Http => transport::serve_http(server, &config.server).await?,
    }

    Ok(())
}
