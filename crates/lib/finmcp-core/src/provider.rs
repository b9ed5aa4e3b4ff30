use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::{
    FinancialStatement,
    KeyMetrics,
    MetricSet,
    StatementKind,
    StockPrice,
    StockProfile,
};
use crate::ticker::Ticker;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

const PROFILE_MODULES: &str = "assetProfile,price,summaryDetail,financialData";
const PRICE_MODULES: &str = "price";
const METRICS_MODULES: &str = "financialData,defaultKeyStatistics,price";

/// Market-data provider adapter over the quote-summary query surface.
///
/// One shared instance is built at startup and reused read-only across all
/// requests; each operation issues exactly one provider call, with no retries
/// and no caching.
#[derive(Clone)]
pub struct YahooProvider {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    timeout: Duration,
}

impl YahooProvider {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches company name, sector, and summary fields for a ticker.
    ///
    /// # Errors
    /// `NotFound` when the provider answers with its not-found error or an
    /// empty/placeholder record; `NetworkFailure` and `UpstreamFormatError`
    /// per the adapter taxonomy.
    pub async fn fetch_profile(&self, ticker: &Ticker) -> Result<StockProfile, ProviderError> {
        let result = self.quote_summary(ticker, PROFILE_MODULES).await?;
        let price = result.get("price");
        let asset_profile = result.get("assetProfile");
        let summary = result.get("summaryDetail");
        let financial = result.get("financialData");

        let profile = StockProfile {
            symbol: ticker.as_str().to_string(),
            short_name: field_str(price, "shortName"),
            long_name: field_str(price, "longName"),
            sector: field_str(asset_profile, "sector"),
            industry: field_str(asset_profile, "industry"),
            market_cap: field_f64(price, "marketCap")
                .or_else(|| field_f64(summary, "marketCap")),
            current_price: field_f64(financial, "currentPrice")
                .or_else(|| field_f64(price, "regularMarketPrice")),
            currency: field_str(price, "currency").unwrap_or_else(|| "USD".to_string()),
        };

        if profile.is_placeholder() {
            return Err(not_found(ticker));
        }
        Ok(profile)
    }

    /// Fetches the current/most recent trade price for a ticker.
    ///
    /// # Errors
    /// Fails per the adapter taxonomy; a priced record that comes back with
    /// no price field is `NotFound`, matching the empty-object condition.
    pub async fn fetch_price(&self, ticker: &Ticker) -> Result<StockPrice, ProviderError> {
        let result = self.quote_summary(ticker, PRICE_MODULES).await?;
        let price_module = result.get("price");

        let Some(price) = field_f64(price_module, "regularMarketPrice")
            .or_else(|| field_f64(price_module, "currentPrice"))
        else {
            return Err(not_found(ticker));
        };

        let as_of = field_i64(price_module, "regularMarketTime")
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        Ok(StockPrice {
            symbol: ticker.as_str().to_string(),
            price,
            currency: field_str(price_module, "currency").unwrap_or_else(|| "USD".to_string()),
            as_of,
        })
    }

    /// Fetches historical statement line items, oriented by period.
    ///
    /// # Errors
    /// `UpstreamFormatError` when the tabular shape cannot be normalized;
    /// `NotFound` when the provider has no statement history for the symbol.
    pub async fn fetch_statements(
        &self,
        ticker: &Ticker,
        kind: StatementKind,
    ) -> Result<FinancialStatement, ProviderError> {
        let result = self.quote_summary(ticker, kind.module()).await?;

        let Some(module) = result.get(kind.module()) else {
            return Err(not_found(ticker));
        };
        let items = module
            .get(kind.items_key())
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ProviderError::UpstreamFormat(format!(
                    "statement module '{}' is missing its '{}' period array",
                    kind.module(),
                    kind.items_key()
                ))
            })?;
        if items.is_empty() {
            return Err(not_found(ticker));
        }

        let mut data: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for item in items {
            let Some(fields) = item.as_object() else {
                return Err(ProviderError::UpstreamFormat(
                    "statement period entry is not an object".to_string(),
                ));
            };
            let Some(end_date) = period_label(fields.get("endDate")) else {
                continue;
            };
            for (metric, value) in fields {
                if metric == "endDate" || metric == "maxAge" {
                    continue;
                }
                if let Some(number) = numeric(value) {
                    data.entry(metric.clone())
                        .or_default()
                        .insert(end_date.clone(), number);
                }
            }
        }

        if data.is_empty() {
            return Err(not_found(ticker));
        }

        Ok(FinancialStatement {
            symbol: ticker.as_str().to_string(),
            statement: kind.display_name().to_string(),
            data,
        })
    }

    /// Fetches the curated key-metric subset for a ticker.
    ///
    /// # Errors
    /// Fails per the adapter taxonomy; a payload carrying none of the curated
    /// metrics is `NotFound`.
    pub async fn fetch_key_metrics(&self, ticker: &Ticker) -> Result<KeyMetrics, ProviderError> {
        let result = self.quote_summary(ticker, METRICS_MODULES).await?;
        let financial = result.get("financialData");
        let statistics = result.get("defaultKeyStatistics");
        let price = result.get("price");

        let ebitda = field_f64(financial, "ebitda");
        let total_revenue = field_f64(financial, "totalRevenue");
        let ebitda_margin = match (ebitda, total_revenue) {
            (Some(e), Some(revenue)) if revenue.abs() > f64::EPSILON => Some(e / revenue),
            _ => None,
        };

        let metrics = MetricSet {
            ebitda,
            total_revenue,
            net_income: field_f64(statistics, "netIncomeToCommon"),
            market_cap: field_f64(price, "marketCap"),
            ebitda_margin,
        };
        if metrics.is_empty() {
            return Err(not_found(ticker));
        }

        Ok(KeyMetrics {
            symbol: ticker.as_str().to_string(),
            period: period_label(statistics.and_then(|module| module.get("mostRecentQuarter"))),
            metrics,
        })
    }

    /// Single chokepoint every operation funnels through: issues the
    /// quote-summary call and imposes the error taxonomy on its outcome.
    async fn quote_summary(
        &self,
        ticker: &Ticker,
        modules: &str,
    ) -> Result<serde_json::Map<String, Value>, ProviderError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={modules}",
            self.base_url,
            ticker.as_str()
        );
        debug!(ticker = %ticker, modules, "querying provider");

        let request = HttpRequest::get(url).with_timeout(self.timeout);
        let response = self
            .transport
            .get(request)
            .await
            .map_err(|err| ProviderError::Network(err.to_string()))?;

        if response.status == 404 {
            return Err(not_found(ticker));
        }
        if !response.is_success() {
            return Err(ProviderError::Network(format!(
                "provider returned HTTP {}",
                response.status
            )));
        }

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(&response.body)
            .map_err(|err| ProviderError::UpstreamFormat(err.to_string()))?;
        let body = envelope.quote_summary;

        if let Some(error) = body.error {
            if error.is_not_found() {
                return Err(not_found(ticker));
            }
            return Err(ProviderError::UpstreamFormat(error.describe()));
        }

        let mut results = body.result.unwrap_or_default();
        if results.is_empty() {
            return Err(not_found(ticker));
        }
        match results.swap_remove(0) {
            Value::Object(map) => Ok(map),
            other => Err(ProviderError::UpstreamFormat(format!(
                "quote-summary result is not an object: {other}"
            ))),
        }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::default()))
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<QuoteSummaryError>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl QuoteSummaryError {
    fn is_not_found(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case("not found"))
    }

    fn describe(&self) -> String {
        match (self.code.as_deref(), self.description.as_deref()) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (Some(code), None) => code.to_string(),
            (None, Some(description)) => description.to_string(),
            (None, None) => "provider reported an unspecified error".to_string(),
        }
    }
}

fn not_found(ticker: &Ticker) -> ProviderError {
    ProviderError::NotFound {
        ticker: ticker.as_str().to_string(),
    }
}

/// Numeric provider fields are either plain numbers or `{"raw": n, "fmt": _}`.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Object(map) => map.get("raw").and_then(Value::as_f64),
        _ => None,
    }
}

fn numeric_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::Object(map) => map.get("raw").and_then(Value::as_i64),
        _ => None,
    }
}

fn field_f64(module: Option<&Value>, key: &str) -> Option<f64> {
    module.and_then(|value| value.get(key)).and_then(numeric)
}

fn field_i64(module: Option<&Value>, key: &str) -> Option<i64> {
    module
        .and_then(|value| value.get(key))
        .and_then(numeric_i64)
}

fn field_str(module: Option<&Value>, key: &str) -> Option<String> {
    module
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Prefers the provider's formatted date label, falling back to the raw value.
fn period_label(value: Option<&Value>) -> Option<String> {
    let value = value?;
    if let Some(label) = value.get("fmt").and_then(Value::as_str) {
        return Some(label.to_string());
    }
    if let Some(label) = value.as_str() {
        return Some(label.to_string());
    }
    numeric_i64(value).map(|raw| raw.to_string())
}
