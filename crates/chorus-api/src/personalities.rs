use axum::{Json, extract::State};

use chorus_types::api::PersonalitySummary;

use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<PersonalitySummary>> {
    let summaries = state
        .registry
        .all()
        .iter()
        .map(|p| PersonalitySummary {
            name: p.name.to_string(),
            style: p.style.to_string(),
            traits: p.traits.iter().map(|t| t.to_string()).collect(),
        })
        .collect();
    Json(summaries)
}
