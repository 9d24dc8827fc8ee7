//! Row and input types for the store. Distinct from chorus-types models so
//! the storage encoding can change without touching the API.

pub struct SnapshotRow {
    pub seq: i64,
    pub taken_at: String,
    pub messages: String,
}

pub struct NotificationRow {
    pub id: i64,
    pub message: String,
    pub related_post_id: Option<i64>,
    pub created_at: String,
    pub seen: bool,
}

/// Everything needed to append a post; id and timestamps are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub created_by: String,
    pub parent_id: Option<i64>,
    pub is_automated: bool,
    pub personality_tag: Option<String>,
}

impl NewPost {
    pub fn human(content: impl Into<String>, created_by: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            content: content.into(),
            created_by: created_by.into(),
            parent_id,
            is_automated: false,
            personality_tag: None,
        }
    }

    /// A reply authored by a personality. `tag` is the personality's style.
    pub fn automated(
        content: impl Into<String>,
        personality: impl Into<String>,
        tag: impl Into<String>,
        parent_id: Option<i64>,
    ) -> Self {
        Self {
            content: content.into(),
            created_by: personality.into(),
            parent_id,
            is_automated: true,
            personality_tag: Some(tag.into()),
        }
    }
}

pub(crate) fn encode_time(t: chrono::DateTime<chrono::Utc>) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
}

pub(crate) fn decode_time(raw: &str) -> crate::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&chrono::Utc))
        .map_err(|e| anyhow::anyhow!("Corrupt timestamp '{}': {}", raw, e).into())
}
