use std::sync::Arc;

use chorus_db::Database;
use chorus_personas::PersonalityRegistry;
use chorus_replies::ReplyScheduler;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub registry: Arc<PersonalityRegistry>,
    pub scheduler: ReplyScheduler,
}

/// Run a blocking store call off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> chorus_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    Ok(tokio::task::spawn_blocking(move || f(db.as_ref())).await??)
}
