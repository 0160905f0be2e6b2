//! Company profile and headline types served to the dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use super::candle::Symbol;

/// Static company facts shown next to the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub symbol: Symbol,
    pub company_name: String,
    pub sector: String,
    pub industry: String,
    pub website: String,
    pub description: String,
    pub market_cap: u64,
    pub image: Option<String>,
}

/// One news headline about a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(with = "published_date")]
    pub published_date: NaiveDate,
    pub publisher: String,
}

mod published_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}
