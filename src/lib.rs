//! Pixel Trader - stock chart backend and arbitrage simulator.
//!
//! Two synthetic price sources random-walk the same tickers. Every pair of
//! ticks is compared ticker by ticker, and divergences above a relative
//! threshold are recorded as arbitrage opportunities in a JSON log. An HTTP
//! API serves OHLC candles to a chart frontend and controls the simulation.
//!
//! # Modules
//!
//! - [`domain`] - Tickers, snapshots, opportunity records, candles and the
//!   pure detector
//! - [`feed`] - Price feed trait, random-walk simulator and the pairing merge
//! - [`store`] - Append-only opportunity log (JSON file or in memory)
//! - [`app`] - Configuration, shared state, the simulation loop and its
//!   controller
//! - [`market_data`] - Candle provider trait and the mock provider
//! - [`api`] - axum router and handlers
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use pixel_trader::domain::{detect, PriceSnapshot, Ticker};
//!
//! let first: PriceSnapshot = [(Ticker::new("AAPL"), 100.0)].into_iter().collect();
//! let second: PriceSnapshot = [(Ticker::new("AAPL"), 100.6)].into_iter().collect();
//!
//! let opportunities = detect(&first, &second, 0.005).unwrap();
//! assert_eq!(opportunities.len(), 1);
//! assert_eq!(opportunities[0].difference_pct(), 0.5982);
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod feed;
pub mod market_data;
pub mod store;
