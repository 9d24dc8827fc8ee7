use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use chorus_db::{NewPost, StoreError};
use chorus_replies::resolve_context;
use chorus_types::api::{CreatePostRequest, EditPostRequest};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// GET /posts — current flat message list.
pub async fn get_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = with_db(&state, |db| db.latest()).await?;
    Ok(Json(messages))
}

/// POST /posts — create a post, then hand it to the reply scheduler without
/// waiting on it.
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_post = NewPost::human(req.content, req.created_by, req.parent_id);
    let post = with_db(&state, move |db| db.create_post(new_post)).await?;

    debug!("Post {} created by {}", post.id, post.created_by);
    // Handle intentionally dropped: the reply runs to completion on its own.
    let _ = state.scheduler.schedule(post.clone());

    Ok((StatusCode::CREATED, Json(post)))
}

/// PATCH /posts/{id} — replace a post's content.
pub async fn edit_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<EditPostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = with_db(&state, move |db| db.edit_post(post_id, &req.content)).await?;
    Ok(Json(post))
}

/// GET /posts/{id}/thread — the flattened thread the post belongs to.
pub async fn get_thread(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = with_db(&state, |db| db.latest()).await?;
    if !messages.iter().any(|m| m.id == post_id) {
        return Err(StoreError::NotFound(format!("post {}", post_id)).into());
    }
    Ok(Json(resolve_context(Some(post_id), &messages)))
}
