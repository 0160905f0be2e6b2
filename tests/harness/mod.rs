#![allow(dead_code)]

pub mod failing_store;
pub mod scripted_feed;

use pixel_trader::domain::{PriceSnapshot, Ticker};

/// Build a snapshot from `(ticker, price)` pairs.
pub fn snapshot(prices: &[(&str, f64)]) -> PriceSnapshot {
    prices
        .iter()
        .map(|(ticker, price)| (Ticker::new(*ticker), *price))
        .collect()
}
