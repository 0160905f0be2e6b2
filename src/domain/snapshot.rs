//! Price snapshots produced by a single source.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::ids::{SourceName, Ticker};

/// One point-in-time mapping of tickers to prices from a single source.
///
/// Ordered by ticker so iteration, and therefore detection output, is stable.
pub type PriceSnapshot = BTreeMap<Ticker, f64>;

/// A snapshot tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTick {
    pub source: SourceName,
    pub prices: PriceSnapshot,
    pub captured_at: DateTime<Utc>,
}

impl SourceTick {
    pub fn new(source: SourceName, prices: PriceSnapshot, captured_at: DateTime<Utc>) -> Self {
        Self {
            source,
            prices,
            captured_at,
        }
    }
}

/// Two ticks joined by arrival, one per source.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPair {
    pub first: SourceTick,
    pub second: SourceTick,
}

impl TickPair {
    pub fn new(first: SourceTick, second: SourceTick) -> Self {
        Self { first, second }
    }

    /// Capture time of the pair: the later of the two ticks.
    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.first.captured_at.max(self.second.captured_at)
    }
}

/// Parse `TICKER=PRICE` entries into a snapshot.
///
/// Tickers are upper-cased. A repeated ticker keeps the last price.
pub fn parse_snapshot<S: AsRef<str>>(entries: &[S]) -> Result<PriceSnapshot, DomainError> {
    let mut snapshot = PriceSnapshot::new();
    for entry in entries {
        let entry = entry.as_ref();
        let invalid = || DomainError::InvalidPriceEntry {
            entry: entry.to_string(),
        };

        let (ticker, price) = entry.split_once('=').ok_or_else(invalid)?;
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(invalid());
        }
        let price: f64 = price.trim().parse().map_err(|_| invalid())?;
        snapshot.insert(Ticker::new(ticker.to_uppercase()), price);
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_snapshot_reads_pairs() {
        let snapshot = parse_snapshot(&["aapl=100.5", "TSLA = 200"]).unwrap();
        assert_eq!(snapshot.get(&Ticker::new("AAPL")), Some(&100.5));
        assert_eq!(snapshot.get(&Ticker::new("TSLA")), Some(&200.0));
    }

    #[test]
    fn parse_snapshot_rejects_missing_separator() {
        let err = parse_snapshot(&["AAPL100"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPriceEntry { .. }));
    }

    #[test]
    fn parse_snapshot_rejects_bad_price() {
        assert!(parse_snapshot(&["AAPL=abc"]).is_err());
        assert!(parse_snapshot(&["=10"]).is_err());
    }

    #[test]
    fn pair_capture_time_is_later_tick() {
        let early = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 2).unwrap();
        let pair = TickPair::new(
            SourceTick::new(SourceName::new("A"), PriceSnapshot::new(), late),
            SourceTick::new(SourceName::new("B"), PriceSnapshot::new(), early),
        );
        assert_eq!(pair.captured_at(), late);
    }
}
