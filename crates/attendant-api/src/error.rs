use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use attendant_core::OrchestratorError;
use attendant_persist::PersistError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The remote assistant platform failed or misbehaved.
    #[error("{0}")]
    Upstream(String),

    /// We gave up waiting for the remote run.
    #[error("{0}")]
    Timeout(String),

    /// The persistence layer is degraded.
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, detail = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::NotFound(id) => {
                ApiError::NotFound(format!("Client not found: {}", id))
            }
            OrchestratorError::RunTimeout { .. } => ApiError::Timeout(err.to_string()),
            OrchestratorError::PersistenceDegraded(_) => ApiError::Unavailable(err.to_string()),
            OrchestratorError::RunFailed { .. }
            | OrchestratorError::Provisioning(_)
            | OrchestratorError::ThreadCreation(_)
            | OrchestratorError::EmptyResponse
            | OrchestratorError::UnexpectedRole
            | OrchestratorError::Platform(_) => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::InvalidObjectId(id) => {
                ApiError::BadRequest(format!("Invalid id: {}", id))
            }
            other => ApiError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = OrchestratorError::NotFound("ghost".to_string()).into();
        assert_eq!(
            not_found.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let timeout: ApiError = OrchestratorError::RunTimeout { attempts: 10 }.into();
        assert_eq!(
            timeout.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );

        let degraded: ApiError =
            PersistError::Internal("mongo down".to_string()).into();
        assert_eq!(
            degraded.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
