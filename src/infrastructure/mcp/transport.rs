//! # Transports
//!
//! Binds a `PythonRunnerServer` either to the process's stdin/stdout or to a
//! streamable HTTP endpoint.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio::net::TcpListener;

use crate::domain::config::ServerConfig;
use crate::infrastructure::mcp::server::PythonRunnerServer;
use crate::strings::logs;

/// Serves over stdin/stdout until the peer closes the stream.
pub async fn serve_stdio(server: PythonRunnerServer) -> Result<()> {
    let name = server_name(&server);
    tracing::info!("{}", logs::serving_stdio(&name));

    let service = server
        .serve(stdio())
        .await
        .context("Failed to initialize stdio transport")?;
    let reason = service.waiting().await?;

    tracing::info!("{} ({:?})", logs::STDIO_CLOSED, reason);
    Ok(())
}

/// Binds `host:port` from the config and serves until Ctrl-C.
pub async fn serve_http(server: PythonRunnerServer, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    serve_http_on(listener, server, &config.path, shutdown_signal()).await
}

/// Serves streamable HTTP on an already bound listener until `shutdown` resolves.
pub async fn serve_http_on<F>(
    listener: TcpListener,
    server: PythonRunnerServer,
    path: &str,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let name = server_name(&server);
    let addr = listener.local_addr()?;

    // Each HTTP session gets its own handler instance; they all share the executor.
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let router = if path == "/" {
        axum::Router::new().fallback_service(service)
    } else {
        axum::Router::new().nest_service(path, service)
    };

    tracing::info!("{}", logs::serving_http(&name, &addr.to_string(), path));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn server_name(server: &PythonRunnerServer) -> String {
    use rmcp::ServerHandler;
    server.get_info().server_info.name
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
        std::future::pending::<()>().await;
    }
    tracing::info!("{}", logs::SHUTDOWN);
}
