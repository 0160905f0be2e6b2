//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional and
//! falls back to the defaults below. The server bind address can be
//! overridden with `PIXEL_TRADER_HOST` and `PIXEL_TRADER_PORT`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{DetectorConfig, Interval, Period, Symbol, TimestampPolicy, DEFAULT_THRESHOLD};
use crate::error::{ConfigError, Result};
use crate::feed::FeedConfig;

mod logging;

pub use logging::LoggingConfig;

/// Environment variable overriding `server.host`.
pub const HOST_ENV: &str = "PIXEL_TRADER_HOST";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PIXEL_TRADER_PORT";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
}

/// Arbitrage simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Minimum relative divergence (fraction) reported as an opportunity.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Which instant opportunity records are stamped with.
    #[serde(default)]
    pub timestamp: TimestampPolicy,

    /// Names of the two simulated sources.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// JSON array file receiving detected opportunities.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Seed for reproducible walks. Source two uses `seed + 1`.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub feed: FeedConfig,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_sources() -> Vec<String> {
    vec!["BrokerA".to_string(), "BrokerB".to_string()]
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/opportunities.json")
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            timestamp: TimestampPolicy::default(),
            sources: default_sources(),
            log_path: default_log_path(),
            seed: None,
            feed: FeedConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Detector settings derived from this section.
    #[must_use]
    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            threshold: self.threshold,
            timestamp: self.timestamp,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `*` or a comma separated list of allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Candle endpoint defaults and the mock provider seed.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default = "default_period")]
    pub default_period: String,
    #[serde(default = "default_interval")]
    pub default_interval: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_period() -> String {
    "1mo".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            default_period: default_period(),
            default_interval: default_interval(),
            seed: None,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Load `path`, or use defaults when the file does not exist.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse, apply environment overrides and validate.
    #[allow(clippy::result_large_err)]
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(HOST_ENV) {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: PORT_ENV,
                reason: format!("'{port}' is not a valid port"),
            })?;
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.validate_simulation()?;
        self.validate_feed()?;

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "host" }.into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }

        let md = &self.market_data;
        Symbol::parse(&md.default_symbol).map_err(|e| invalid("default_symbol", e))?;
        md.default_period
            .parse::<Period>()
            .map_err(|e| invalid("default_period", e))?;
        md.default_interval
            .parse::<Interval>()
            .map_err(|e| invalid("default_interval", e))?;

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_simulation(&self) -> Result<()> {
        let sim = &self.simulation;

        if !sim.threshold.is_finite() || sim.threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "threshold",
                reason: format!("must be a non-negative fraction, got {}", sim.threshold),
            }
            .into());
        }

        if sim.sources.len() != 2 {
            return Err(ConfigError::InvalidValue {
                field: "sources",
                reason: format!("exactly two sources required, got {}", sim.sources.len()),
            }
            .into());
        }
        if sim.sources.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "sources",
                reason: "source names cannot be empty".into(),
            }
            .into());
        }
        if sim.sources[0] == sim.sources[1] {
            return Err(ConfigError::InvalidValue {
                field: "sources",
                reason: format!("source names must differ, both are '{}'", sim.sources[0]),
            }
            .into());
        }

        if sim.log_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "log_path" }.into());
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_feed(&self) -> Result<()> {
        let feed = &self.simulation.feed;

        if feed.tickers.is_empty() {
            return Err(ConfigError::MissingField { field: "tickers" }.into());
        }
        if feed.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "tickers",
                reason: "ticker names cannot be empty".into(),
            }
            .into());
        }

        if !feed.price_floor.is_finite() || feed.price_floor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "price_floor",
                reason: format!("must be positive, got {}", feed.price_floor),
            }
            .into());
        }
        if !feed.initial_price_min.is_finite() || feed.initial_price_min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_price_min",
                reason: format!("must be positive, got {}", feed.initial_price_min),
            }
            .into());
        }
        if !feed.initial_price_max.is_finite() || feed.initial_price_max < feed.initial_price_min {
            return Err(ConfigError::InvalidValue {
                field: "initial_price_max",
                reason: format!(
                    "must be at least initial_price_min ({}), got {}",
                    feed.initial_price_min, feed.initial_price_max
                ),
            }
            .into());
        }
        if !feed.max_step.is_finite() || feed.max_step < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_step",
                reason: format!("must be non-negative, got {}", feed.max_step),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.threshold, 0.005);
        assert_eq!(config.simulation.sources, vec!["BrokerA", "BrokerB"]);
        assert_eq!(config.simulation.feed.tickers, vec!["AAPL", "TSLA"]);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.simulation.log_path, PathBuf::from("logs/opportunities.json"));
        assert_eq!(config.simulation.timestamp, TimestampPolicy::Evaluation);
        assert_eq!(config.market_data.default_period, "1mo");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let toml = r#"
[simulation]
threshold = 0.01
timestamp = "capture"

[simulation.feed]
tickers = ["MSFT"]
jitter_ms = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.threshold, 0.01);
        assert_eq!(config.simulation.timestamp, TimestampPolicy::Capture);
        assert_eq!(config.simulation.feed.tickers, vec!["MSFT"]);
        assert_eq!(config.simulation.feed.jitter_ms, 0);
        assert_eq!(config.simulation.feed.update_interval_ms, 1000);
        assert_eq!(config.simulation.sources.len(), 2);
    }

    #[test]
    fn test_detector_config_from_simulation() {
        let mut config = Config::default();
        config.simulation.threshold = 0.02;
        config.simulation.timestamp = TimestampPolicy::Capture;

        let detector = config.simulation.detector();
        assert_eq!(detector.threshold, 0.02);
        assert_eq!(detector.timestamp, TimestampPolicy::Capture);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = Config::default();
        config.simulation.threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_identical_sources() {
        let mut config = Config::default();
        config.simulation.sources = vec!["A".into(), "A".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_floor() {
        let mut config = Config::default();
        config.simulation.feed.price_floor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_price_range() {
        let mut config = Config::default();
        config.simulation.feed.initial_price_min = 300.0;
        config.simulation.feed.initial_price_max = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_market_data_defaults() {
        let mut config = Config::default();
        config.market_data.default_interval = "7m".into();
        assert!(config.validate().is_err());
    }
}
