use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company profile fields curated from the provider's quote-summary payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockProfile {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub currency: String,
}

impl StockProfile {
    /// True when the provider returned a record with no usable fields.
    ///
    /// The upstream client does not raise on unrecognized symbols; it answers
    /// with a sparse object instead. A record that carries neither a name nor
    /// a sector nor any priced field is treated as a placeholder, not data.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.short_name.is_none()
            && self.long_name.is_none()
            && self.sector.is_none()
            && self.industry.is_none()
            && self.market_cap.is_none()
            && self.current_price.is_none()
    }
}

/// Most recent trade price for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockPrice {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
    pub as_of: DateTime<Utc>,
}

/// Which financial statement to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
}

impl StatementKind {
    /// Quote-summary module carrying this statement's history.
    #[must_use]
    pub const fn module(self) -> &'static str {
        match self {
            Self::Income => "incomeStatementHistory",
            Self::BalanceSheet => "balanceSheetHistory",
            Self::CashFlow => "cashflowStatementHistory",
        }
    }

    /// Key of the period array inside the statement module.
    #[must_use]
    pub const fn items_key(self) -> &'static str {
        match self {
            Self::Income => "incomeStatementHistory",
            Self::BalanceSheet => "balanceSheetStatements",
            Self::CashFlow => "cashflowStatements",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Income => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow Statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementKindError {
    value: String,
}

impl fmt::Display for StatementKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid statement kind '{}': use 'income', 'balance_sheet', or 'cash_flow'",
            self.value
        )
    }
}

impl Error for StatementKindError {}

impl FromStr for StatementKind {
    type Err = StatementKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "balance_sheet" | "balance" => Ok(Self::BalanceSheet),
            "cash_flow" | "cash" => Ok(Self::CashFlow),
            _ => Err(StatementKindError {
                value: value.to_string(),
            }),
        }
    }
}

/// Historical statement line items keyed by metric, then by period end date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialStatement {
    pub symbol: String,
    pub statement: String,
    pub data: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Curated metric subset extracted from the profile payload family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyMetrics {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub metrics: MetricSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda_margin: Option<f64>,
}

impl MetricSet {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ebitda.is_none()
            && self.total_revenue.is_none()
            && self.net_income.is_none()
            && self.market_cap.is_none()
    }
}
