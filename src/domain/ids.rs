//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instrument ticker - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a new Ticker from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Name of a price source (e.g. a broker feed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceName(String);

impl SourceName {
    /// Create a new SourceName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the source name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SourceName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SourceName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_new_and_as_str() {
        let id = Ticker::new("AAPL");
        assert_eq!(id.as_str(), "AAPL");
    }

    #[test]
    fn ticker_orders_lexically() {
        let mut tickers = vec![Ticker::from("TSLA"), Ticker::from("AAPL")];
        tickers.sort();
        assert_eq!(tickers, vec![Ticker::from("AAPL"), Ticker::from("TSLA")]);
    }

    #[test]
    fn ticker_serializes_as_plain_string() {
        let json = serde_json::to_string(&Ticker::new("MSFT")).unwrap();
        assert_eq!(json, "\"MSFT\"");
    }

    #[test]
    fn source_name_display() {
        let name = SourceName::from("BrokerA".to_string());
        assert_eq!(format!("{}", name), "BrokerA");
    }
}
