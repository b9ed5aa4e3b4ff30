use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized failure taxonomy surfaced to tool callers.
///
/// `NetworkFailure` marks transient transport conditions potentially worth
/// retrying at a higher layer; `NotFound` is a semantic result about the
/// ticker itself; `UpstreamFormatError` covers responses the adapter cannot
/// normalize; `ValidationError` covers malformed invocations at the protocol
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NetworkFailure,
    NotFound,
    UpstreamFormatError,
    ValidationError,
}

/// Fault raised by provider adapter operations.
///
/// The upstream client conflates missing tickers, sparse payloads, and raw
/// transport failures; this type is the single normalized shape allowed past
/// the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    Network(String),
    NotFound { ticker: String },
    UpstreamFormat(String),
}

impl ProviderError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::NetworkFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UpstreamFormat(_) => ErrorKind::UpstreamFormatError,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(f, "provider unreachable: {message}"),
            Self::NotFound { ticker } => write!(f, "no data available for ticker {ticker}"),
            Self::UpstreamFormat(message) => {
                write!(f, "provider response could not be normalized: {message}")
            }
        }
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_taxonomy() {
        assert_eq!(
            ProviderError::Network("timeout".to_string()).kind(),
            ErrorKind::NetworkFailure
        );
        assert_eq!(
            ProviderError::NotFound {
                ticker: "ZZZZINVALID".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ProviderError::UpstreamFormat("bad json".to_string()).kind(),
            ErrorKind::UpstreamFormatError
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        let kind = serde_json::to_value(ErrorKind::NetworkFailure).expect("kind should serialize");
        assert_eq!(kind, serde_json::json!("network_failure"));
    }
}
