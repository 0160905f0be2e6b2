//! Fixed company profiles and generated headlines for the dashboard.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};

use super::CompanyProvider;
use crate::domain::{CompanyProfile, NewsItem, Symbol};
use crate::error::Result;

const FALLBACK_MARKET_CAP: u64 = 50_000_000_000;

struct KnownCompany {
    symbol: &'static str,
    name: &'static str,
    industry: &'static str,
    website: &'static str,
    description: &'static str,
    market_cap: u64,
    logo_domain: &'static str,
}

const KNOWN: &[KnownCompany] = &[
    KnownCompany {
        symbol: "AAPL",
        name: "Apple Inc.",
        industry: "Consumer Electronics",
        website: "https://www.apple.com",
        description: "Apple Inc. designs, manufactures, and markets smartphones, personal \
                      computers, tablets, wearables, and accessories worldwide.",
        market_cap: 3_000_000_000_000,
        logo_domain: "apple.com",
    },
    KnownCompany {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        industry: "Software",
        website: "https://www.microsoft.com",
        description: "Microsoft Corporation develops, licenses, and supports software, \
                      services, devices, and solutions worldwide.",
        market_cap: 2_800_000_000_000,
        logo_domain: "microsoft.com",
    },
    KnownCompany {
        symbol: "GOOGL",
        name: "Alphabet Inc.",
        industry: "Internet Content & Information",
        website: "https://www.alphabet.com",
        description: "Alphabet Inc. provides online advertising services in the United \
                      States, Europe, the Middle East, Africa, the Asia-Pacific, Canada, \
                      and Latin America.",
        market_cap: 1_700_000_000_000,
        logo_domain: "google.com",
    },
];

/// Headline templates, newest first. `{}` is replaced by the symbol.
const HEADLINES: &[(&str, &str)] = &[
    ("{} Reports Strong Quarterly Earnings", "Financial Times"),
    ("{} Announces New Product Launch", "TechCrunch"),
    ("{} Stock Analysis: Bullish Outlook", "MarketWatch"),
    ("{} CEO Discusses Future Strategy", "Bloomberg"),
];

/// Profiles for a few large caps, generic ones for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCompanyProvider;

impl MockCompanyProvider {
    pub fn new() -> Self {
        Self
    }

    /// Profile for `symbol`, falling back to a generic one.
    pub fn profile(&self, symbol: &Symbol) -> CompanyProfile {
        match KNOWN.iter().find(|c| c.symbol == symbol.as_str()) {
            Some(known) => CompanyProfile {
                symbol: symbol.clone(),
                company_name: known.name.to_string(),
                sector: "Technology".to_string(),
                industry: known.industry.to_string(),
                website: known.website.to_string(),
                description: known.description.to_string(),
                market_cap: known.market_cap,
                image: Some(format!("https://logo.clearbit.com/{}", known.logo_domain)),
            },
            None => CompanyProfile {
                symbol: symbol.clone(),
                company_name: format!("{symbol} Corporation"),
                sector: "Technology".to_string(),
                industry: "Software".to_string(),
                website: String::new(),
                description: format!("Mock data for {symbol} - this is demonstration data."),
                market_cap: FALLBACK_MARKET_CAP,
                image: None,
            },
        }
    }

    /// One headline per day ending at `latest`, newest first.
    pub fn headlines(&self, symbol: &Symbol, latest: NaiveDate) -> Vec<NewsItem> {
        HEADLINES
            .iter()
            .zip(0i64..)
            .map(|((title, publisher), age)| NewsItem {
                title: title.replace("{}", symbol.as_str()),
                url: format!("https://example.com/news{}", age + 1),
                published_date: latest - Duration::days(age),
                publisher: (*publisher).to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl CompanyProvider for MockCompanyProvider {
    async fn company(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        Ok(self.profile(symbol))
    }

    async fn news(&self, symbol: &Symbol) -> Result<Vec<NewsItem>> {
        Ok(self.headlines(symbol, Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).unwrap()
    }

    #[test]
    fn test_known_profile() {
        let profile = MockCompanyProvider::new().profile(&symbol("msft"));

        assert_eq!(profile.company_name, "Microsoft Corporation");
        assert_eq!(profile.market_cap, 2_800_000_000_000);
        assert_eq!(
            profile.image.as_deref(),
            Some("https://logo.clearbit.com/microsoft.com")
        );
    }

    #[test]
    fn test_unknown_symbol_gets_generic_profile() {
        let profile = MockCompanyProvider::new().profile(&symbol("ZZZ"));

        assert_eq!(profile.company_name, "ZZZ Corporation");
        assert_eq!(profile.industry, "Software");
        assert_eq!(profile.market_cap, FALLBACK_MARKET_CAP);
        assert!(profile.website.is_empty());
        assert!(profile.image.is_none());
    }

    #[test]
    fn test_headlines_newest_first() {
        let latest = NaiveDate::from_ymd_opt(2025, 5, 30).unwrap();
        let news = MockCompanyProvider::new().headlines(&symbol("TSLA"), latest);

        assert_eq!(news.len(), 4);
        assert_eq!(news[0].title, "TSLA Reports Strong Quarterly Earnings");
        assert_eq!(news[0].published_date, latest);
        assert_eq!(news[3].publisher, "Bloomberg");
        assert_eq!(news[3].url, "https://example.com/news4");
        assert!(news.windows(2).all(|w| w[0].published_date > w[1].published_date));
    }
}
