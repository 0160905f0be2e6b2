//! Market-data collaborators behind the candle, company and news endpoints.

mod company;
mod mock;

use async_trait::async_trait;

use crate::domain::{Candle, CompanyProfile, Interval, NewsItem, Period, Symbol};
use crate::error::Result;

pub use company::MockCompanyProvider;
pub use mock::{base_price, MockCandleProvider};

/// Source of historical OHLC bars.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Bars for `symbol` over `period`, oldest first.
    ///
    /// An unknown symbol yields an empty list rather than an error.
    async fn fetch(&self, symbol: &Symbol, period: Period, interval: Interval)
        -> Result<Vec<Candle>>;

    /// Short description for logs.
    fn name(&self) -> &'static str;
}

/// Source of company profiles and headlines.
#[async_trait]
pub trait CompanyProvider: Send + Sync {
    async fn company(&self, symbol: &Symbol) -> Result<CompanyProfile>;

    /// Recent headlines, newest first.
    async fn news(&self, symbol: &Symbol) -> Result<Vec<NewsItem>>;
}
