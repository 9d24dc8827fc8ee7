use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use chorus_types::api::ToggleLikeRequest;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// POST /posts/{id}/like — like if the user hasn't yet, unlike otherwise.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<ToggleLikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = req.user;
    let toggle = with_db(&state, move |db| db.toggle_like(post_id, &user)).await?;

    debug!("Post {} {:?}, {} likes", post_id, toggle.action, toggle.like_count);
    Ok(Json(toggle))
}
