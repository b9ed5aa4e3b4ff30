//! Daemon entry point for the finmcp MCP server.
//!
//! Loads configuration from the environment, builds the shared provider
//! handle, and serves the MCP protocol over stdio and/or streamable HTTP.

mod config;

use std::sync::Arc;

use finmcp_core::provider::YahooProvider;
use finmcp_core::transport::ReqwestTransport;
use finmcp_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::FinmcpConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries the MCP stream; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = FinmcpConfig::from_args()?;
    let transport = Arc::new(ReqwestTransport::new(&config.user_agent));
    let provider = Arc::new(
        YahooProvider::new(transport)
            .with_base_url(config.provider_base_url.clone())
            .with_timeout(config.provider_timeout),
    );

    if config.http_serve {
        let http_provider = provider.clone();
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        if config.enable_stdio {
            tokio::spawn(async move {
                if let Err(err) = serve_streamable_http(http_provider, http_config).await {
                    error!("streamable http server failed: {err}");
                }
            });
        } else {
            serve_streamable_http(http_provider, http_config).await?;
            return Ok(());
        }
    }

    serve_stdio(provider).await?;
    Ok(())
}
