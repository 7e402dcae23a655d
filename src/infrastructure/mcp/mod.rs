//! # MCP Module
//!
//! Model Context Protocol hosting for the runner.
//! Includes the tool server and the stdio / streamable HTTP transports.

pub mod server;
pub mod transport;

pub use server::PythonRunnerServer;
