use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chorus_db::StoreError;
use chorus_types::api::ErrorBody;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            ApiError::Store(StoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "validation", msg.clone())
            }
            ApiError::Store(StoreError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, "not_found", format!("{} not found", what))
            }
            ApiError::Store(StoreError::Persistence(_)) | ApiError::Join(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message, kind })).into_response()
    }
}
