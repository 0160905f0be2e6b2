//! Random-walk price feed.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::trace;

use super::PriceFeed;
use crate::domain::{PriceSnapshot, SourceName, SourceTick, Ticker};

/// Random-walk parameters shared by both simulated sources.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Tickers tracked by every source.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Lower bound of the uniform starting price.
    #[serde(default = "default_initial_price_min")]
    pub initial_price_min: f64,

    /// Upper bound of the uniform starting price.
    #[serde(default = "default_initial_price_max")]
    pub initial_price_max: f64,

    /// Each tick moves a price by a uniform amount in `[-max_step, max_step]`.
    #[serde(default = "default_max_step")]
    pub max_step: f64,

    /// Prices never drop below this value.
    #[serde(default = "default_price_floor")]
    pub price_floor: f64,

    /// Base delay between ticks in milliseconds.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Extra uniform delay of up to this many milliseconds per tick.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,
}

fn default_tickers() -> Vec<String> {
    vec!["AAPL".to_string(), "TSLA".to_string()]
}

fn default_initial_price_min() -> f64 {
    100.0
}

fn default_initial_price_max() -> f64 {
    300.0
}

fn default_max_step() -> f64 {
    1.0
}

fn default_price_floor() -> f64 {
    1.0
}

fn default_update_interval_ms() -> u64 {
    1000
}

fn default_jitter_ms() -> u64 {
    1000
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            initial_price_min: default_initial_price_min(),
            initial_price_max: default_initial_price_max(),
            max_step: default_max_step(),
            price_floor: default_price_floor(),
            update_interval_ms: default_update_interval_ms(),
            jitter_ms: default_jitter_ms(),
        }
    }
}

/// One source's independent random walk over the configured tickers.
///
/// Construction seeds every ticker; `step` perturbs all of them. The walk is
/// not restartable: start over by building a new feed.
pub struct SimulatedFeed {
    source: SourceName,
    config: FeedConfig,
    prices: PriceSnapshot,
    rng: StdRng,
}

impl SimulatedFeed {
    /// Create a feed seeded from OS entropy.
    pub fn new(source: SourceName, config: FeedConfig) -> Self {
        Self::with_rng(source, config, StdRng::from_entropy())
    }

    /// Create a feed with a reproducible walk.
    pub fn with_seed(source: SourceName, config: FeedConfig, seed: u64) -> Self {
        Self::with_rng(source, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: SourceName, config: FeedConfig, mut rng: StdRng) -> Self {
        let prices = config
            .tickers
            .iter()
            .map(|ticker| {
                let start = rng.gen_range(config.initial_price_min..=config.initial_price_max);
                (Ticker::new(ticker.as_str()), start)
            })
            .collect();

        Self {
            source,
            config,
            prices,
            rng,
        }
    }

    /// Current prices without advancing the walk.
    pub fn prices(&self) -> &PriceSnapshot {
        &self.prices
    }

    /// Perturb every price once and return the updated snapshot.
    pub fn step(&mut self) -> PriceSnapshot {
        let max_step = self.config.max_step;
        let floor = self.config.price_floor;

        for price in self.prices.values_mut() {
            let change = if max_step > 0.0 {
                self.rng.gen_range(-max_step..=max_step)
            } else {
                0.0
            };
            *price = (*price + change).max(floor);
        }

        self.prices.clone()
    }

    /// Delay before the next tick is yielded: base interval plus jitter.
    pub fn next_delay(&mut self) -> Duration {
        let jitter = if self.config.jitter_ms > 0 {
            self.rng.gen_range(0..=self.config.jitter_ms)
        } else {
            0
        };
        Duration::from_millis(self.config.update_interval_ms + jitter)
    }
}

#[async_trait]
impl PriceFeed for SimulatedFeed {
    fn source(&self) -> &SourceName {
        &self.source
    }

    async fn next_tick(&mut self) -> Option<SourceTick> {
        let prices = self.step();
        let delay = self.next_delay();
        sleep(delay).await;

        trace!(source = %self.source, delay_ms = delay.as_millis() as u64, "Feed tick");
        Some(SourceTick::new(self.source.clone(), prices, Utc::now()))
    }
}
