use finmcp_core::models::StatementKind;
use finmcp_core::ticker::Ticker;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{FinanceMcp, helpers};

/// Parameters for fetching financial statement data.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetFinancialDataParams {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub ticker: String,
    /// Statement to fetch: `income`, `balance_sheet`, or `cash_flow`.
    pub statement_kind: String,
}

/// Parameters for fetching key financial metrics.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetKeyMetricsParams {
    /// Stock ticker symbol (e.g. IBM, AAPL).
    pub ticker: String,
}

#[tool_router(router = tool_router_financials, vis = "pub")]
impl FinanceMcp {
    #[tool(
        description = "Get financial statement data for a company. statement_kind is one of: income, balance_sheet, cash_flow."
    )]
    pub(crate) async fn get_financial_data(
        &self,
        Parameters(params): Parameters<GetFinancialDataParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ticker = match Ticker::parse(&params.ticker) {
            Ok(ticker) => ticker,
            Err(err) => return helpers::validation_error(err.to_string()),
        };
        let kind = match params.statement_kind.parse::<StatementKind>() {
            Ok(kind) => kind,
            Err(err) => return helpers::validation_error(err.to_string()),
        };
        match self.provider().fetch_statements(&ticker, kind).await {
            Ok(statement) => Ok(CallToolResult::success(vec![Content::json(statement)?])),
            Err(err) => helpers::provider_error(&err),
        }
    }

    #[tool(description = "Get key financial metrics including EBITDA for a company.")]
    pub(crate) async fn get_key_metrics(
        &self,
        Parameters(params): Parameters<GetKeyMetricsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ticker = match Ticker::parse(&params.ticker) {
            Ok(ticker) => ticker,
            Err(err) => return helpers::validation_error(err.to_string()),
        };
        match self.provider().fetch_key_metrics(&ticker).await {
            Ok(metrics) => Ok(CallToolResult::success(vec![Content::json(metrics)?])),
            Err(err) => helpers::provider_error(&err),
        }
    }
}
