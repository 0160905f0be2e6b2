//! Opportunity records emitted by the detector.
//!
//! A record captures both source prices for one ticker together with the
//! derived divergence figures. Derived fields are computed by the constructor
//! so they always agree with the prices they came from.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::ids::Ticker;

/// Decimal places kept for `difference_pct`.
pub const DIFFERENCE_PCT_DECIMALS: i32 = 4;

/// Decimal places kept for `estimated_profit`.
pub const PROFIT_DECIMALS: i32 = 2;

/// A detected price discrepancy between two sources for one ticker.
///
/// Field names match the persisted JSON log format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,
    ticker: Ticker,
    price_source_1: f64,
    price_source_2: f64,
    difference_pct: f64,
    estimated_profit: f64,
}

/// Read an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

impl OpportunityRecord {
    /// Build a record from the two prices, deriving the rounded figures.
    ///
    /// The caller is responsible for the prices having a non-zero average;
    /// the detector checks this before constructing records.
    pub fn from_prices(
        ticker: Ticker,
        price_source_1: f64,
        price_source_2: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let diff = (price_source_1 - price_source_2).abs();
        let avg = (price_source_1 + price_source_2) / 2.0;
        Self {
            timestamp,
            ticker,
            price_source_1,
            price_source_2,
            difference_pct: round_to(diff / avg * 100.0, DIFFERENCE_PCT_DECIMALS),
            estimated_profit: round_to(diff, PROFIT_DECIMALS),
        }
    }

    /// Capture or evaluation time, depending on the detector's policy.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn price_source_1(&self) -> f64 {
        self.price_source_1
    }

    pub fn price_source_2(&self) -> f64 {
        self.price_source_2
    }

    /// Divergence as a percentage of the average price, 4 decimals.
    pub fn difference_pct(&self) -> f64 {
        self.difference_pct
    }

    /// Absolute price difference, 2 decimals.
    pub fn estimated_profit(&self) -> f64 {
        self.estimated_profit
    }
}

/// Round half away from zero to the given number of decimals.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
