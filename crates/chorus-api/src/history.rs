use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use chorus_db::StoreError;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// GET /history — every snapshot, oldest first.
pub async fn get_history(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let history = with_db(&state, |db| db.history()).await?;
    Ok(Json(history))
}

/// GET /history/{index} — one past state by zero-based position.
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = with_db(&state, move |db| db.snapshot_at(index))
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("snapshot {}", index)))?;
    Ok(Json(snapshot))
}
