//! # MCP Server
//!
//! Hosts the `run_python` tool and the configured static resources on top of
//! `rmcp`. The tool is registered in the server's own `ToolRouter`, built in
//! the constructor; there is no process-wide registry.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam, RawResource, ReadResourceRequestParam, ReadResourceResult,
        Resource, ResourceContents, ServerCapabilities, ServerInfo,
    },
    schemars::JsonSchema,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::config::{AppConfig, StaticResource};
use crate::domain::error::ExecutionError;
use crate::domain::traits::CodeExecutor;
use crate::strings::{logs, messages};

/// Static resources are served as plain text.
const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct RunPythonRequest {
    /// Python source to run. Indentation shared by every line is stripped first.
    pub code: String,
}

#[derive(Clone)]
pub struct PythonRunnerServer {
    executor: Arc<dyn CodeExecutor>,
    name: String,
    instructions: String,
    resources: Arc<Vec<StaticResource>>,
    tool_router: ToolRouter<Self>,
}

impl PythonRunnerServer {
    pub fn new(executor: Arc<dyn CodeExecutor>, config: &AppConfig) -> Self {
        Self {
            executor,
            name: config.server.name.clone(),
            instructions: messages::server_instructions(config.execution.timeout_secs),
            resources: Arc::new(config.resources.clone()),
            tool_router: Self::tool_router(),
        }
    }

    fn resource_list(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| {
                RawResource {
                    description: entry.description.clone(),
                    mime_type: Some(TEXT_MIME.to_string()),
                    ..RawResource::new(entry.uri.clone(), entry.name.clone())
                }
                .no_annotation()
            })
            .collect()
    }

    fn find_resource(&self, uri: &str) -> Option<&StaticResource> {
        self.resources.iter().find(|entry| entry.uri == uri)
    }

    /// Contents of a resource, with the same MIME type the listing advertises.
    fn resource_contents(&self, uri: &str) -> Option<ResourceContents> {
        self.find_resource(uri)
            .map(|entry| ResourceContents::TextResourceContents {
                uri: entry.uri.clone(),
                mime_type: Some(TEXT_MIME.to_string()),
                text: entry.text.clone(),
                meta: None,
            })
    }
}

/// Script failures go back as tool errors the caller can read; anything else
/// is a fault of the host and becomes a protocol error.
fn failure_result(err: ExecutionError) -> Result<CallToolResult, McpError> {
    if !err.is_script_failure() {
        tracing::error!("{}", logs::tool_fault(messages::TOOL_NAME, &err.to_string()));
        return Err(McpError::internal_error(err.to_string(), None));
    }

    let text = match err {
        ExecutionError::Timeout { seconds } => messages::execution_timed_out(seconds),
        ExecutionError::NonZeroExit {
            code,
            stdout,
            stderr,
        } => messages::script_failed(code, &stdout, &stderr),
        other => other.to_string(),
    };
    Ok(CallToolResult::error(vec![Content::text(text)]))
}

#[tool_router]
impl PythonRunnerServer {
    #[tool(description = "Execute Python code in a temp file and return stdout/stderr.")]
    async fn run_python(
        &self,
        Parameters(RunPythonRequest { code }): Parameters<RunPythonRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("{}", logs::tool_call(messages::TOOL_NAME, code.len()));

        match self.executor.execute(&code).await {
            Ok(stdout) => Ok(CallToolResult::success(vec![Content::text(stdout)])),
            Err(err) => failure_result(err),
        }
    }
}

#[tool_handler]
impl ServerHandler for PythonRunnerServer {
    fn get_info(&self) -> ServerInfo {
        let capabilities = if self.resources.is_empty() {
            ServerCapabilities::builder().enable_tools().build()
        } else {
            ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build()
        };

        ServerInfo {
            capabilities,
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(self.instructions.clone()),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(self.resource_list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match self.resource_contents(&request.uri) {
            Some(contents) => Ok(ReadResourceResult {
                contents: vec![contents],
            }),
            None => Err(McpError::resource_not_found(
                "Resource not found",
                Some(serde_json::json!({ "uri": request.uri })),
            )),
        }
    }
}
