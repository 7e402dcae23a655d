//! # Domain Traits
//!
//! Abstract interface for the code execution backend.
//! The MCP layer talks to this trait, not to a concrete relay.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::types::{ExecutionOutcome, ExecutionRequest};

/// Something that can run a snippet of source code and hand back its output.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Run the request and return everything that was captured.
    async fn run(&self, request: ExecutionRequest) -> Result<ExecutionOutcome>;

    /// Run `code` and return only its stdout, as the `run_python` tool does.
    async fn execute(&self, code: &str) -> Result<String> {
        let outcome = self.run(ExecutionRequest::new(code)).await?;
        Ok(outcome.stdout)
    }
}
