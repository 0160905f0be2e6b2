//! Domain errors for detection and request validation.
//!
//! These are returned when a domain precondition does not hold: mismatched
//! snapshots, prices that make the divergence undefined, or request
//! parameters outside the accepted sets.
//!
//! # Examples
//!
//! ```
//! use pixel_trader::domain::{detect, DomainError, PriceSnapshot, Ticker};
//!
//! let mut first = PriceSnapshot::new();
//! first.insert(Ticker::new("AAPL"), 100.0);
//! let second = PriceSnapshot::new();
//!
//! let result = detect(&first, &second, 0.005);
//! assert!(matches!(result, Err(DomainError::MissingTicker { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A ticker of the first snapshot has no price in the second.
    #[error("ticker {ticker} missing from second price snapshot")]
    MissingTicker {
        /// The ticker that could not be paired.
        ticker: String,
    },

    /// Both prices average to zero, so the relative divergence is undefined.
    #[error("average price for {ticker} is zero, divergence undefined")]
    ZeroAveragePrice {
        /// The ticker whose prices average to zero.
        ticker: String,
    },

    /// A price was NaN or infinite.
    #[error("price for {ticker} is not finite: {price}")]
    NonFinitePrice {
        /// The affected ticker.
        ticker: String,
        /// The offending price.
        price: f64,
    },

    /// Threshold must be a finite, non-negative fraction.
    #[error("threshold must be finite and non-negative, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    #[error("{0}")]
    InvalidSymbol(String),

    #[error("Invalid period. Allowed: {allowed}")]
    InvalidPeriod {
        /// Comma separated list of accepted tokens.
        allowed: String,
    },

    #[error("Invalid interval. Allowed: {allowed}")]
    InvalidInterval {
        /// Comma separated list of accepted tokens.
        allowed: String,
    },

    /// A `TICKER=PRICE` pair could not be parsed.
    #[error("invalid price entry '{entry}': expected TICKER=PRICE")]
    InvalidPriceEntry {
        /// The raw entry.
        entry: String,
    },
}
