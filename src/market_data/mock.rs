//! Random-walk candle generator for demos and tests.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::CandleProvider;
use crate::domain::{round_to, Candle, Interval, Period, Symbol};
use crate::error::Result;

const PRICE_DECIMALS: i32 = 2;
const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Starting price for the walk of a well-known symbol.
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "AAPL" => 180.0,
        "MSFT" => 350.0,
        "GOOGL" => 130.0,
        "TSLA" => 200.0,
        "AMZN" => 140.0,
        "NVDA" => 900.0,
        "META" => 320.0,
        "NFLX" => 400.0,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Generates one daily bar per calendar day of the requested period.
///
/// The interval is accepted but ignored: bars are always daily.
#[derive(Debug, Clone, Default)]
pub struct MockCandleProvider {
    seed: Option<u64>,
}

impl MockCandleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request replays the same walk.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// `days` bars ending at `end`, oldest first.
    pub fn generate(&self, symbol: &Symbol, days: u32, end: NaiveDate) -> Vec<Candle> {
        let mut rng = self.rng();
        let mut price = base_price(symbol.as_str());
        let mut previous_close: Option<f64> = None;
        let mut candles = Vec::with_capacity(days as usize);

        for offset in (0..days).rev() {
            let date = end - Duration::days(i64::from(offset));

            price *= 1.0 + rng.gen_range(-0.05..=0.05);
            let close = price;
            let open = match previous_close {
                Some(prev) => prev * (1.0 + rng.gen_range(-0.02..=0.02)),
                None => close,
            };
            let high = open.max(close) * rng.gen_range(1.001..=1.03);
            let low = open.min(close) * rng.gen_range(0.97..=0.999);
            let volume = rng.gen_range(10_000_000..=100_000_000);

            let close = round_to(close, PRICE_DECIMALS);
            let day = date.format("%Y-%m-%d").to_string();
            candles.push(Candle {
                date: day.clone(),
                time: day,
                open: round_to(open, PRICE_DECIMALS),
                high: round_to(high, PRICE_DECIMALS),
                low: round_to(low, PRICE_DECIMALS),
                close,
                volume,
            });
            previous_close = Some(close);
        }

        candles
    }
}

#[async_trait]
impl CandleProvider for MockCandleProvider {
    async fn fetch(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<Candle>> {
        let today = Utc::now().date_naive();
        let days = period.days(today.ordinal());

        debug!(
            symbol = %symbol,
            period = %period,
            interval = %interval,
            days,
            "Generating mock candles"
        );
        Ok(self.generate(symbol, days, today))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
