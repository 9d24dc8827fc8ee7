use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One post or reply on the board.
///
/// `parent_id == None` marks a root post. Ids are assigned by the snapshot
/// store and are never reused across the whole history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content: String,
    #[serde(default)]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub is_automated: bool,
    #[serde(default)]
    pub personality_tag: Option<String>,
}

impl Message {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// A full copy of the message list at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Snapshot {
    pub fn now(messages: Vec<Message>) -> Self {
        Self {
            taken_at: Utc::now(),
            messages,
        }
    }
}

/// A user-facing event in the notification log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub related_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub seen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

/// Result of toggling a user's like on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub action: LikeAction,
    pub like_count: usize,
}
