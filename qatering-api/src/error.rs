use axum::{http::StatusCode, response::Json};
use serde_json::json;

use qatering_service::error::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthenticationFailed,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            ApiError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::Service(err) => match err {
                ServiceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                ServiceError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
                ServiceError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
                ServiceError::Internal(source) => {
                    tracing::error!("store failure: {source}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
