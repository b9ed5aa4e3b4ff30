//! Shared test doubles: a scripted provider transport and canned payloads.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use finmcp_core::provider::YahooProvider;
use finmcp_core::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use rmcp::model::CallToolResult;
use serde_json::json;

use crate::ErrorEnvelope;

/// Transport double that replays a queue of canned outcomes and counts calls.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn push_ok(&self, body: serde_json::Value) {
        self.responses
            .lock()
            .expect("transport queue lock")
            .push_back(Ok(HttpResponse::ok_json(body.to_string())));
    }

    pub fn push_err(&self, err: TransportError) {
        self.responses
            .lock()
            .expect("transport queue lock")
            .push_back(Err(err));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpTransport for ScriptedTransport {
    fn get<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .responses
            .lock()
            .expect("transport queue lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("scripted transport exhausted")));
        Box::pin(async move { outcome })
    }
}

pub fn scripted_provider() -> (YahooProvider, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::default());
    let provider =
        YahooProvider::new(transport.clone()).with_base_url("http://provider.test");
    (provider, transport)
}

/// Provider over an empty script; fine for tests that never dispatch.
pub fn noop_provider() -> YahooProvider {
    scripted_provider().0
}

pub fn msft_profile_payload() -> serde_json::Value {
    json!({
        "quoteSummary": {
            "result": [{
                "price": {
                    "shortName": "Microsoft",
                    "longName": "Microsoft Corporation",
                    "currency": "USD",
                    "marketCap": {"raw": 3_100_000_000_000.0, "fmt": "3.1T"},
                    "regularMarketPrice": {"raw": 417.32, "fmt": "417.32"},
                    "regularMarketTime": 1_719_864_000
                },
                "assetProfile": {
                    "sector": "Technology",
                    "industry": "Software - Infrastructure"
                },
                "summaryDetail": {},
                "financialData": {
                    "currentPrice": {"raw": 417.32, "fmt": "417.32"}
                }
            }],
            "error": null
        }
    })
}

pub fn not_found_payload(symbol: &str) -> serde_json::Value {
    json!({
        "quoteSummary": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": format!("Quote not found for ticker symbol: {symbol}")
            }
        }
    })
}

pub fn income_statement_payload() -> serde_json::Value {
    json!({
        "quoteSummary": {
            "result": [{
                "incomeStatementHistory": {
                    "incomeStatementHistory": [{
                        "maxAge": 1,
                        "endDate": {"raw": 1_719_705_600, "fmt": "2024-06-30"},
                        "totalRevenue": {"raw": 245_122_000_000.0, "fmt": "245.12B"},
                        "netIncome": {"raw": 88_136_000_000.0, "fmt": "88.14B"}
                    }]
                }
            }],
            "error": null
        }
    })
}

pub fn key_metrics_payload() -> serde_json::Value {
    json!({
        "quoteSummary": {
            "result": [{
                "financialData": {
                    "ebitda": {"raw": 125_000_000_000.0, "fmt": "125B"},
                    "totalRevenue": {"raw": 250_000_000_000.0, "fmt": "250B"}
                },
                "defaultKeyStatistics": {
                    "netIncomeToCommon": {"raw": 88_136_000_000.0, "fmt": "88.14B"},
                    "mostRecentQuarter": {"raw": 1_719_705_600, "fmt": "2024-06-30"}
                },
                "price": {
                    "marketCap": {"raw": 3_100_000_000_000.0, "fmt": "3.1T"}
                }
            }],
            "error": null
        }
    })
}

/// Extracts the JSON payload of a successful tool result.
pub fn success_json(result: &CallToolResult) -> serde_json::Value {
    let value = serde_json::to_value(result).expect("result should serialize");
    assert_ne!(
        value["isError"],
        json!(true),
        "expected a successful tool result: {value}"
    );
    serde_json::from_str(
        value["content"][0]["text"]
            .as_str()
            .expect("tool result should carry text content"),
    )
    .expect("tool result content should be JSON")
}

/// Extracts the error envelope of a flagged tool result.
pub fn envelope_from(result: &CallToolResult) -> ErrorEnvelope {
    let value = serde_json::to_value(result).expect("result should serialize");
    assert_eq!(
        value["isError"],
        json!(true),
        "expected an error-flagged tool result: {value}"
    );
    serde_json::from_str(
        value["content"][0]["text"]
            .as_str()
            .expect("tool result should carry text content"),
    )
    .expect("error envelope should parse")
}
