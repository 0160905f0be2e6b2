//! Price feed abstraction and the synthetic two-source simulator.
//!
//! A [`PriceFeed`] is an explicit state object advanced by its driver: each
//! call to [`PriceFeed::next_tick`] moves the feed one step and suspends until
//! the tick is ready. [`MergedFeed`] joins two feeds point-wise.

mod merged;
mod simulator;

use async_trait::async_trait;

use crate::domain::{SourceName, SourceTick};

pub use merged::MergedFeed;
pub use simulator::{FeedConfig, SimulatedFeed};

/// A source of price snapshots.
#[async_trait]
pub trait PriceFeed: Send {
    /// Name of the source this feed reports for.
    fn source(&self) -> &SourceName;

    /// Advance the feed and return the next snapshot.
    ///
    /// Returns `None` once a finite feed is exhausted. Simulated feeds never
    /// end.
    async fn next_tick(&mut self) -> Option<SourceTick>;
}
