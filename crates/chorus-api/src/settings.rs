use axum::{Json, extract::State, response::IntoResponse};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// Settings are an opaque JSON object owned by the frontend.
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = with_db(&state, |db| db.settings()).await?;
    Ok(Json(settings))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = with_db(&state, move |db| db.put_settings(body)).await?;
    Ok(Json(settings))
}
