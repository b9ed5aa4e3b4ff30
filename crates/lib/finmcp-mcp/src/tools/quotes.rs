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

/// Parameters for fetching a company profile.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetStockInfoParams {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub ticker: String,
}

/// Parameters for fetching the current stock price.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetStockPriceParams {
    /// Stock ticker symbol (e.g. AAPL, MSFT).
    pub ticker: String,
}

#[tool_router(router = tool_router_quotes, vis = "pub")]
impl FinanceMcp {
    #[tool(
        description = "Get basic information about a stock: name, sector, industry, market cap, current price."
    )]
    pub(crate) async fn get_stock_info(
        &self,
        Parameters(params): Parameters<GetStockInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ticker = match Ticker::parse(&params.ticker) {
            Ok(ticker) => ticker,
            Err(err) => return helpers::validation_error(err.to_string()),
        };
        match self.provider().fetch_profile(&ticker).await {
            Ok(profile) => Ok(CallToolResult::success(vec![Content::json(profile)?])),
            Err(err) => helpers::provider_error(&err),
        }
    }

    #[tool(description = "Get the current price of a stock.")]
    pub(crate) async fn get_stock_price(
        &self,
        Parameters(params): Parameters<GetStockPriceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ticker = match Ticker::parse(&params.ticker) {
            Ok(ticker) => ticker,
            Err(err) => return helpers::validation_error(err.to_string()),
        };
        match self.provider().fetch_price(&ticker).await {
            Ok(price) => Ok(CallToolResult::success(vec![Content::json(price)?])),
            Err(err) => helpers::provider_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finmcp_core::error::ErrorKind;
    use finmcp_core::transport::TransportError;

    use crate::ErrorEnvelope;
    use crate::testing::{
        envelope_from,
        msft_profile_payload,
        not_found_payload,
        scripted_provider,
        success_json,
    };

    #[tokio::test]
    async fn stock_info_returns_profile_record() {
        let (provider, transport) = scripted_provider();
        transport.push_ok(msft_profile_payload());
        let server = FinanceMcp::new(provider);

        let result = server
            .get_stock_info(Parameters(GetStockInfoParams {
                ticker: "msft".to_string(),
            }))
            .await
            .expect("tool call should succeed");
        let profile = success_json(&result);

        assert_eq!(profile["symbol"], "MSFT");
        assert_eq!(profile["long_name"], "Microsoft Corporation");
        assert_eq!(profile["sector"], "Technology");
    }

    #[tokio::test]
    async fn unknown_ticker_yields_not_found_envelope() {
        let (provider, transport) = scripted_provider();
        transport.push_ok(not_found_payload("ZZZZINVALID"));
        let server = FinanceMcp::new(provider);

        let result = server
            .get_stock_info(Parameters(GetStockInfoParams {
                ticker: "ZZZZINVALID".to_string(),
            }))
            .await
            .expect("faults must be shaped as data");
        let envelope: ErrorEnvelope = envelope_from(&result);
        assert_eq!(envelope.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn empty_ticker_is_a_validation_envelope() {
        let (provider, transport) = scripted_provider();
        let server = FinanceMcp::new(provider);

        let result = server
            .get_stock_price(Parameters(GetStockPriceParams {
                ticker: "   ".to_string(),
            }))
            .await
            .expect("validation must be shaped as data");
        let envelope: ErrorEnvelope = envelope_from(&result);
        assert_eq!(envelope.kind, ErrorKind::ValidationError);
        assert_eq!(transport.calls(), 0, "no provider call for invalid input");
    }

    #[tokio::test]
    async fn network_failure_envelope_then_recovery_on_same_server() {
        let (provider, transport) = scripted_provider();
        transport.push_err(TransportError::new("connection refused"));
        transport.push_ok(msft_profile_payload());
        let server = FinanceMcp::new(provider);

        let failed = server
            .get_stock_price(Parameters(GetStockPriceParams {
                ticker: "MSFT".to_string(),
            }))
            .await
            .expect("transport faults must be shaped as data");
        let envelope: ErrorEnvelope = envelope_from(&failed);
        assert_eq!(envelope.kind, ErrorKind::NetworkFailure);

        let recovered = server
            .get_stock_price(Parameters(GetStockPriceParams {
                ticker: "MSFT".to_string(),
            }))
            .await
            .expect("server stays usable after a provider fault");
        let price = success_json(&recovered);
        assert_eq!(price["symbol"], "MSFT");
        assert_eq!(price["price"], 417.32);
    }

    #[tokio::test]
    async fn repeated_price_calls_are_independently_sourced() {
        let (provider, transport) = scripted_provider();
        transport.push_ok(msft_profile_payload());
        transport.push_ok(msft_profile_payload());
        let server = FinanceMcp::new(provider);

        for _ in 0..2 {
            let result = server
                .get_stock_price(Parameters(GetStockPriceParams {
                    ticker: "MSFT".to_string(),
                }))
                .await
                .expect("price call should succeed");
            let _ = success_json(&result);
        }
        assert_eq!(transport.calls(), 2, "each invocation hits the provider");
    }
}
