//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use crate::error::{Error, SimulationError};

/// Errors returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Domain(e) => ApiError::BadRequest(format!("Validation error: {e}")),
            Error::Simulation(e @ SimulationError::InvalidTransition { .. }) => {
                ApiError::Conflict(e.to_string())
            }
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(err) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RunState;
    use crate::domain::DomainError;

    #[test]
    fn test_domain_errors_are_bad_requests() {
        let err: ApiError = Error::from(DomainError::InvalidSymbol("Symbol is required".into())).into();
        match err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Validation error: Symbol is required"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_transition_is_conflict() {
        let err: ApiError = Error::from(SimulationError::InvalidTransition {
            action: "pause",
            state: RunState::Idle,
        })
        .into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_io_error_is_internal() {
        let err: ApiError = Error::from(std::io::Error::other("disk")).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
