//! Point-wise join of two price feeds.

use tracing::debug;

use super::PriceFeed;
use crate::domain::TickPair;

/// Pairs ticks from two independent feeds.
///
/// Each call to [`MergedFeed::next_pair`] advances both feeds concurrently
/// and resolves once both have produced a tick. Ticks are paired by arrival,
/// not by timestamp.
pub struct MergedFeed {
    first: Box<dyn PriceFeed>,
    second: Box<dyn PriceFeed>,
}

impl MergedFeed {
    pub fn new(first: Box<dyn PriceFeed>, second: Box<dyn PriceFeed>) -> Self {
        Self { first, second }
    }

    /// Names of the two sources, in pairing order.
    pub fn sources(&self) -> (&str, &str) {
        (self.first.source().as_str(), self.second.source().as_str())
    }

    /// Wait for one tick from each feed.
    ///
    /// Returns `None` if either feed is exhausted; the other side's tick, if
    /// any, is dropped.
    pub async fn next_pair(&mut self) -> Option<TickPair> {
        let (first, second) = tokio::join!(self.first.next_tick(), self.second.next_tick());

        match (first, second) {
            (Some(first), Some(second)) => Some(TickPair::new(first, second)),
            (first, second) => {
                debug!(
                    first_ended = first.is_none(),
                    second_ended = second.is_none(),
                    "Price feed exhausted"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::SourceName;
    use crate::feed::{FeedConfig, SimulatedFeed};

    fn feed(name: &str, interval_ms: u64, seed: u64) -> Box<dyn PriceFeed> {
        let config = FeedConfig {
            update_interval_ms: interval_ms,
            jitter_ms: 0,
            ..Default::default()
        };
        Box::new(SimulatedFeed::with_seed(SourceName::new(name), config, seed))
    }

    #[tokio::test(start_paused = true)]
    async fn test_pair_waits_for_slower_feed() {
        let mut merged = MergedFeed::new(feed("BrokerA", 100, 1), feed("BrokerB", 500, 2));

        let start = tokio::time::Instant::now();
        let pair = merged.next_pair().await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(pair.first.source.as_str(), "BrokerA");
        assert_eq!(pair.second.source.as_str(), "BrokerB");
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sources_are_independent_walks() {
        let mut merged = MergedFeed::new(feed("BrokerA", 10, 1), feed("BrokerB", 10, 2));
        assert_eq!(merged.sources(), ("BrokerA", "BrokerB"));

        let pair = merged.next_pair().await.unwrap();
        assert_eq!(pair.first.prices.len(), pair.second.prices.len());
        assert_ne!(pair.first.prices, pair.second.prices);
    }
}
