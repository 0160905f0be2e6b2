//! Candle endpoints for the chart frontend.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ApiError, AppState};
use crate::domain::{Candle, Interval, Period, Symbol};
use crate::error::Error;

#[derive(Debug, Default, Deserialize)]
pub struct CandleQuery {
    pub symbol: Option<String>,
    pub period: Option<String>,
    pub interval: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandlesResponse {
    pub symbol: Symbol,
    pub candles: Vec<Candle>,
}

/// `GET /api/candles?symbol=&period=&interval=`
pub async fn get_candles(
    State(state): State<AppState>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<CandlesResponse>, ApiError> {
    let symbol = query
        .symbol
        .clone()
        .unwrap_or_else(|| state.market_data.default_symbol.clone());
    fetch(&state, &symbol, query).await
}

/// `GET /api/candles/:symbol?period=&interval=`
pub async fn get_candles_for_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<CandleQuery>,
) -> Result<Json<CandlesResponse>, ApiError> {
    fetch(&state, &symbol, query).await
}

async fn fetch(
    state: &AppState,
    raw_symbol: &str,
    query: CandleQuery,
) -> Result<Json<CandlesResponse>, ApiError> {
    let defaults = &state.market_data;
    let symbol = Symbol::parse(raw_symbol).map_err(Error::from)?;
    let period: Period = query
        .period
        .as_deref()
        .unwrap_or(defaults.default_period.as_str())
        .parse()
        .map_err(Error::from)?;
    let interval: Interval = query
        .interval
        .as_deref()
        .unwrap_or(defaults.default_interval.as_str())
        .parse()
        .map_err(Error::from)?;

    let candles = state.provider.fetch(&symbol, period, interval).await?;
    if candles.is_empty() {
        return Err(ApiError::NotFound(format!("No data found for symbol: {symbol}")));
    }

    info!(
        symbol = %symbol,
        period = %period,
        interval = %interval,
        bars = candles.len(),
        provider = state.provider.name(),
        "Served candles"
    );
    Ok(Json(CandlesResponse { symbol, candles }))
}
