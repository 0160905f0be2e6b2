//! HTTP API.
//!
//! Thin boundary over the market-data providers and the simulation
//! controller.
//! Handlers return `Result<Json<_>, ApiError>`; errors render as
//! `{"error": "..."}` with a matching status code.

mod arbitrage;
mod candles;
mod company;
mod error;
mod health;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::app::{MarketDataConfig, SimulationController};
use crate::market_data::{CandleProvider, CompanyProvider, MockCompanyProvider};

pub use arbitrage::{ControlResponse, OpportunitiesResponse, DEFAULT_LIMIT, MAX_LIMIT};
pub use candles::CandlesResponse;
pub use error::ApiError;
pub use health::HealthResponse;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SimulationController>,
    pub provider: Arc<dyn CandleProvider>,
    pub companies: Arc<dyn CompanyProvider>,
    pub market_data: Arc<MarketDataConfig>,
}

impl AppState {
    pub fn new(
        controller: Arc<SimulationController>,
        provider: Arc<dyn CandleProvider>,
        market_data: MarketDataConfig,
    ) -> Self {
        Self {
            controller,
            provider,
            companies: Arc::new(MockCompanyProvider::new()),
            market_data: Arc::new(market_data),
        }
    }

    /// Serve company profiles and news from `companies`.
    #[must_use]
    pub fn with_company_provider(mut self, companies: Arc<dyn CompanyProvider>) -> Self {
        self.companies = companies;
        self
    }
}

/// Build the API router with CORS and request tracing.
pub fn create_router(state: AppState, cors_origins: &str) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/candles", get(candles::get_candles))
        .route("/api/candles/:symbol", get(candles::get_candles_for_symbol))
        .route("/api/company/:symbol", get(company::get_company))
        .route("/api/news/:symbol", get(company::get_news))
        .route("/api/arbitrage/status", get(arbitrage::status))
        .route("/api/arbitrage/start", post(arbitrage::start))
        .route("/api/arbitrage/pause", post(arbitrage::pause))
        .route("/api/arbitrage/reset", post(arbitrage::reset))
        .route("/api/arbitrage/opportunities", get(arbitrage::opportunities))
        .route("/api/arbitrage/summary", get(arbitrage::summary))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` allows any origin; otherwise a comma separated allow-list.
fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
