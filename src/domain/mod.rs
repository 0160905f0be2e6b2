//! Source-agnostic domain logic: snapshots, detection, candles.

mod candle;
mod company;
mod detector;
pub mod error;
mod ids;
mod opportunity;
mod snapshot;
mod summary;

pub use candle::{Candle, Interval, Period, Symbol, MAX_SYMBOL_LENGTH};
pub use company::{CompanyProfile, NewsItem};
pub use detector::{
    detect, detect_at, relative_divergence, DetectorConfig, TimestampPolicy, DEFAULT_THRESHOLD,
};
pub use error::DomainError;
pub use ids::{SourceName, Ticker};
pub use opportunity::{round_to, OpportunityRecord};
pub use snapshot::{parse_snapshot, PriceSnapshot, SourceTick, TickPair};
pub use summary::{HourBucket, OpportunitySummary, TickerSummary};
