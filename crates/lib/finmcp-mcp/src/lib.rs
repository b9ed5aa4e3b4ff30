//! MCP server implementation for finmcp.
//!
//! This crate wires the provider adapter into rmcp tool handlers and exposes
//! the MCP-facing surface: four finance tools, one resource template, and the
//! stdio/streamable-HTTP serve runners.

mod helpers;
mod resources;
pub mod server;
mod tools;

pub use helpers::ErrorEnvelope;

use std::sync::Arc;

use finmcp_core::provider::YahooProvider;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
};
use rmcp::model::{
    CallToolRequestParams,
    CallToolResult,
    ListResourceTemplatesResult,
    ListResourcesResult,
    ListToolsResult,
    PaginatedRequestParams,
    ReadResourceRequestParams,
    ReadResourceResult,
    ServerCapabilities,
    ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};

const SERVER_INSTRUCTIONS: &str = r"finmcp provides MCP tools for querying stock and company data on demand.

Tools:
- `get_stock_info` - company profile (name, sector, industry, market cap, current price) for a ticker.
- `get_stock_price` - current/most recent trade price for a ticker.
- `get_financial_data` - historical statement line items; `statement_kind` is one of `income`, `balance_sheet`, `cash_flow`.
- `get_key_metrics` - curated metrics (EBITDA, revenue, net income, market cap, EBITDA margin) for a ticker.

Resources:
- `finance://info/{ticker}` - same profile content as `get_stock_info`.

Notes:
- Ticker symbols are case-insensitive (e.g. `msft` and `MSFT` are equivalent).
- Failures come back as structured data: `{error, kind}` with kind one of
  `network_failure`, `not_found`, `upstream_format_error`, `validation_error`.
  `network_failure` is transient and may be worth retrying; `not_found` is a
  semantic answer about the ticker itself.";

/// MCP server wrapper around the provider adapter and tool routers.
#[derive(Clone)]
pub struct FinanceMcp {
    tool_router: ToolRouter<Self>,
    provider: Arc<YahooProvider>,
}

impl FinanceMcp {
    /// Creates a new server using a provider by value.
    #[must_use]
    pub fn new(provider: YahooProvider) -> Self {
        Self::with_provider(Arc::new(provider))
    }

    /// Creates a new server using a shared provider handle.
    #[must_use]
    pub fn with_provider(provider: Arc<YahooProvider>) -> Self {
        let tool_router = Self::tool_router_quotes() + Self::tool_router_financials();
        Self {
            tool_router,
            provider,
        }
    }

    pub(crate) fn provider(&self) -> &YahooProvider {
        &self.provider
    }
}

impl ServerHandler for FinanceMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Dispatches a tool call, shaping unregistered names as data.
    ///
    /// An unknown tool name is a malformed invocation, so it comes back as a
    /// `validation_error` envelope on a successful protocol response rather
    /// than a protocol-level fault.
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if !self.tool_router.has_route(request.name.as_ref()) {
            return helpers::unknown_tool(&request.name);
        }
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        // Only the template is advertised; concrete URIs are caller-supplied.
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![resources::finance_info_template()],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        resources::read(self, &request.uri).await
    }
}

#[cfg(test)]
pub(crate) mod testing;
