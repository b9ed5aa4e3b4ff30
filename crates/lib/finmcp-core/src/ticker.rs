use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-normalized security symbol (e.g. `MSFT`).
///
/// Tickers are opaque beyond non-emptiness; unrecognized symbols are only
/// discovered by provider failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerError {
    Empty,
}

impl fmt::Display for TickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ticker symbol must not be empty"),
        }
    }
}

impl Error for TickerError {}

impl Ticker {
    /// Normalizes a raw symbol: trims whitespace and uppercases.
    ///
    /// # Errors
    /// Returns [`TickerError::Empty`] when nothing remains after trimming.
    pub fn parse(raw: &str) -> Result<Self, TickerError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(TickerError::Empty);
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
