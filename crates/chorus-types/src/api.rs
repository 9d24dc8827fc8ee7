use serde::{Deserialize, Serialize};

// -- Posts --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditPostRequest {
    pub content: String,
}

// -- Likes --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleLikeRequest {
    pub user: String,
}

// -- Notifications --

#[derive(Debug, Serialize)]
pub struct MarkSeenResponse {
    pub updated: usize,
}

#[derive(Debug, Serialize)]
pub struct UnseenCountResponse {
    pub unseen: usize,
}

// -- Personalities --

#[derive(Debug, Clone, Serialize)]
pub struct PersonalitySummary {
    pub name: String,
    pub style: String,
    pub traits: Vec<String>,
}

// -- Errors --

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}
