use axum::{Json, extract::State, response::IntoResponse};

use chorus_types::api::{MarkSeenResponse, UnseenCountResponse};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notifications = with_db(&state, |db| db.notifications()).await?;
    Ok(Json(notifications))
}

pub async fn mark_seen(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let updated = with_db(&state, |db| db.mark_all_seen()).await?;
    Ok(Json(MarkSeenResponse { updated }))
}

pub async fn unseen_count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let unseen = with_db(&state, |db| db.unseen_count()).await?;
    Ok(Json(UnseenCountResponse { unseen }))
}
