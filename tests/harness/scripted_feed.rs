use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use pixel_trader::domain::{PriceSnapshot, SourceName, SourceTick};
use pixel_trader::feed::{MergedFeed, PriceFeed};

/// Deterministic feed replaying a fixed list of snapshots.
#[derive(Debug)]
pub struct ScriptedFeed {
    source: SourceName,
    ticks: VecDeque<PriceSnapshot>,
    delay: Duration,
}

impl ScriptedFeed {
    pub fn new(source: &str, ticks: impl IntoIterator<Item = PriceSnapshot>) -> Self {
        Self {
            source: SourceName::new(source),
            ticks: ticks.into_iter().collect(),
            delay: Duration::ZERO,
        }
    }

    /// Wait this long before yielding each tick.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PriceFeed for ScriptedFeed {
    fn source(&self) -> &SourceName {
        &self.source
    }

    async fn next_tick(&mut self) -> Option<SourceTick> {
        let prices = self.ticks.pop_front()?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Some(SourceTick::new(self.source.clone(), prices, Utc::now()))
    }
}

/// Pair two scripted feeds.
pub fn merged(first: ScriptedFeed, second: ScriptedFeed) -> MergedFeed {
    MergedFeed::new(Box::new(first), Box::new(second))
}
