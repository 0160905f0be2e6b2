//! Aggregates over the opportunity log.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::Serialize;

use super::opportunity::{round_to, OpportunityRecord, PROFIT_DECIMALS};

/// Per-ticker aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickerSummary {
    pub count: usize,
    pub max_difference_pct: f64,
    pub total_estimated_profit: f64,
}

/// Opportunities detected within one clock hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: DateTime<Utc>,
    pub count: usize,
}

/// Summary of a sequence of opportunity records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpportunitySummary {
    pub total: usize,
    pub first_at: Option<DateTime<Utc>>,
    pub last_at: Option<DateTime<Utc>>,
    pub by_ticker: BTreeMap<String, TickerSummary>,
    /// Chronological, only hours with at least one record.
    pub by_hour: Vec<HourBucket>,
}

impl OpportunitySummary {
    pub fn from_records(records: &[OpportunityRecord]) -> Self {
        let mut by_ticker: BTreeMap<String, TickerSummary> = BTreeMap::new();
        let mut by_hour: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();

        for record in records {
            let entry = by_ticker.entry(record.ticker().to_string()).or_default();
            entry.count += 1;
            entry.max_difference_pct = entry.max_difference_pct.max(record.difference_pct());
            entry.total_estimated_profit += record.estimated_profit();

            *by_hour.entry(floor_to_hour(record.timestamp())).or_default() += 1;
        }

        for summary in by_ticker.values_mut() {
            summary.total_estimated_profit =
                round_to(summary.total_estimated_profit, PROFIT_DECIMALS);
        }

        Self {
            total: records.len(),
            first_at: records.iter().map(OpportunityRecord::timestamp).min(),
            last_at: records.iter().map(OpportunityRecord::timestamp).max(),
            by_ticker,
            by_hour: by_hour
                .into_iter()
                .map(|(hour, count)| HourBucket { hour, count })
                .collect(),
        }
    }
}

fn floor_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(Duration::hours(1)).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ticker;
    use chrono::TimeZone;

    fn record(ticker: &str, p1: f64, p2: f64, h: u32, m: u32) -> OpportunityRecord {
        OpportunityRecord::from_prices(
            Ticker::new(ticker),
            p1,
            p2,
            Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0).unwrap(),
        )
    }

    #[test]
    fn empty_summary() {
        let summary = OpportunitySummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.first_at.is_none());
        assert!(summary.by_hour.is_empty());
    }

    #[test]
    fn groups_by_ticker_and_hour() {
        let records = vec![
            record("AAPL", 100.0, 101.0, 10, 5),
            record("AAPL", 100.0, 102.0, 10, 55),
            record("TSLA", 200.0, 203.0, 11, 0),
        ];

        let summary = OpportunitySummary::from_records(&records);
        assert_eq!(summary.total, 3);

        let aapl = &summary.by_ticker["AAPL"];
        assert_eq!(aapl.count, 2);
        assert_eq!(aapl.total_estimated_profit, 3.0);
        assert_eq!(aapl.max_difference_pct, records[1].difference_pct());

        assert_eq!(summary.by_hour.len(), 2);
        assert_eq!(summary.by_hour[0].count, 2);
        assert_eq!(
            summary.by_hour[0].hour,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
        );
        assert_eq!(summary.by_hour[1].count, 1);
        assert_eq!(summary.last_at, Some(records[2].timestamp()));
    }
}
