//! Simulation control and opportunity log endpoints.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::app::SimulationStatus;
use crate::domain::{OpportunityRecord, OpportunitySummary};

/// Records returned when no `limit` is given.
pub const DEFAULT_LIMIT: usize = 100;

/// Upper bound on `limit`.
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub message: &'static str,
    pub status: SimulationStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpportunityQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct OpportunitiesResponse {
    /// Records in the whole log.
    pub total: usize,
    pub count: usize,
    /// Most recent last.
    pub opportunities: Vec<OpportunityRecord>,
}

pub async fn status(State(state): State<AppState>) -> Json<SimulationStatus> {
    Json(state.controller.status())
}

pub async fn start(State(state): State<AppState>) -> Result<Json<ControlResponse>, ApiError> {
    let status = state.controller.start().await?;
    Ok(Json(ControlResponse {
        message: "Simulation running",
        status,
    }))
}

pub async fn pause(State(state): State<AppState>) -> Result<Json<ControlResponse>, ApiError> {
    let status = state.controller.pause().await?;
    Ok(Json(ControlResponse {
        message: "Simulation paused",
        status,
    }))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<ControlResponse>, ApiError> {
    let status = state.controller.reset().await?;
    Ok(Json(ControlResponse {
        message: "Simulation reset",
        status,
    }))
}

/// The tail of the persisted log.
pub async fn opportunities(
    State(state): State<AppState>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Json<OpportunitiesResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    if limit == 0 {
        return Err(ApiError::BadRequest(
            "Validation error: limit must be at least 1".into(),
        ));
    }

    let mut records = state.controller.store().load()?;
    let total = records.len();
    let tail = records.split_off(total.saturating_sub(limit));

    Ok(Json(OpportunitiesResponse {
        total,
        count: tail.len(),
        opportunities: tail,
    }))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<OpportunitySummary>, ApiError> {
    let records = state.controller.store().load()?;
    Ok(Json(OpportunitySummary::from_records(&records)))
}
