//! Company profile and news endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use tracing::debug;

use super::{ApiError, AppState};
use crate::domain::{CompanyProfile, NewsItem, Symbol};
use crate::error::Error;

/// `GET /api/company/:symbol`
pub async fn get_company(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<CompanyProfile>, ApiError> {
    let symbol = Symbol::parse(&symbol).map_err(Error::from)?;
    let profile = state.companies.company(&symbol).await?;
    debug!(symbol = %symbol, "Served company profile");
    Ok(Json(profile))
}

/// `GET /api/news/:symbol`
pub async fn get_news(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let symbol = Symbol::parse(&symbol).map_err(Error::from)?;
    let news = state.companies.news(&symbol).await?;
    debug!(symbol = %symbol, items = news.len(), "Served news");
    Ok(Json(news))
}
