pub mod error;
pub mod history;
pub mod likes;
pub mod notifications;
pub mod personalities;
pub mod posts;
pub mod settings;
pub mod state;

use axum::{
    Router,
    routing::{get, patch, post},
};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// All board routes with state applied. Layers are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(posts::get_posts).post(posts::create_post))
        .route("/posts/{id}", patch(posts::edit_post))
        .route("/posts/{id}/thread", get(posts::get_thread))
        .route("/posts/{id}/like", post(likes::toggle_like))
        .route("/history", get(history::get_history))
        .route("/history/{index}", get(history::get_snapshot))
        .route("/notifications", get(notifications::list))
        .route("/notifications/mark-seen", post(notifications::mark_seen))
        .route("/notifications/unseen-count", get(notifications::unseen_count))
        .route("/personalities", get(personalities::list))
        .route("/settings", get(settings::get_settings).post(settings::put_settings))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
