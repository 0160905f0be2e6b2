//! Cross-source arbitrage detection.
//!
//! Compares two same-keyed price snapshots and emits an
//! [`OpportunityRecord`] for every ticker whose relative divergence
//! `|p1 - p2| / ((p1 + p2) / 2)` is strictly above the threshold.
//!
//! Both snapshots must carry the same tickers. Detection walks the first
//! snapshot; a ticker with no counterpart in the second is reported as
//! [`DomainError::MissingTicker`] rather than skipped.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::DomainError;
use super::ids::Ticker;
use super::opportunity::OpportunityRecord;
use super::snapshot::{PriceSnapshot, TickPair};

/// Default relative divergence threshold (0.5%).
pub const DEFAULT_THRESHOLD: f64 = 0.005;

/// Which instant an opportunity record is stamped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Time the detector ran.
    #[default]
    Evaluation,
    /// Capture time of the later of the two ticks.
    Capture,
}

/// Configuration for the opportunity detector.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DetectorConfig {
    /// Minimum relative divergence, as a fraction, to report.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Instant used for record timestamps.
    #[serde(default)]
    pub timestamp: TimestampPolicy,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            timestamp: TimestampPolicy::default(),
        }
    }
}

impl DetectorConfig {
    /// Run detection over a joined tick pair, stamping per the policy.
    pub fn detect_pair(&self, pair: &TickPair) -> Result<Vec<OpportunityRecord>, DomainError> {
        let at = match self.timestamp {
            TimestampPolicy::Evaluation => Utc::now(),
            TimestampPolicy::Capture => pair.captured_at(),
        };
        detect_at(&pair.first.prices, &pair.second.prices, self.threshold, at)
    }
}

/// Detect opportunities, stamping records with the current time.
pub fn detect(
    prices1: &PriceSnapshot,
    prices2: &PriceSnapshot,
    threshold: f64,
) -> Result<Vec<OpportunityRecord>, DomainError> {
    detect_at(prices1, prices2, threshold, Utc::now())
}

/// Detect opportunities, stamping records with `at`.
///
/// Deterministic for identical inputs. Output follows the ticker order of
/// `prices1`.
pub fn detect_at(
    prices1: &PriceSnapshot,
    prices2: &PriceSnapshot,
    threshold: f64,
    at: DateTime<Utc>,
) -> Result<Vec<OpportunityRecord>, DomainError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(DomainError::InvalidThreshold { threshold });
    }

    let mut opportunities = Vec::new();

    for (ticker, &p1) in prices1 {
        let p2 = *prices2
            .get(ticker)
            .ok_or_else(|| DomainError::MissingTicker {
                ticker: ticker.to_string(),
            })?;

        let divergence = relative_divergence(ticker, p1, p2)?;
        if divergence > threshold {
            opportunities.push(OpportunityRecord::from_prices(ticker.clone(), p1, p2, at));
        }
    }

    Ok(opportunities)
}

/// `|p1 - p2| / ((p1 + p2) / 2)` with domain checks.
pub fn relative_divergence(ticker: &Ticker, p1: f64, p2: f64) -> Result<f64, DomainError> {
    for price in [p1, p2] {
        if !price.is_finite() {
            return Err(DomainError::NonFinitePrice {
                ticker: ticker.to_string(),
                price,
            });
        }
    }

    let avg = (p1 + p2) / 2.0;
    if avg == 0.0 {
        return Err(DomainError::ZeroAveragePrice {
            ticker: ticker.to_string(),
        });
    }

    Ok((p1 - p2).abs() / avg)
}
