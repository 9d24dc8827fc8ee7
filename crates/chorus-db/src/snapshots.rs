use chorus_types::models::{LikeAction, LikeToggle, Message, Snapshot};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::Database;
use crate::error::{Result, StoreError};
use crate::models::{NewPost, SnapshotRow, decode_time, encode_time};

impl Database {
    // -- Raw snapshot sequence --

    /// Append a snapshot to the end of the history. Returns its sequence number.
    pub fn append(&self, snapshot: &Snapshot) -> Result<i64> {
        self.with_conn(|conn| insert_snapshot(conn, snapshot))
    }

    /// Messages of the most recent snapshot, or empty if nothing was ever stored.
    pub fn latest(&self) -> Result<Vec<Message>> {
        self.with_conn(query_latest)
    }

    /// Every snapshot, oldest first.
    pub fn history(&self) -> Result<Vec<Snapshot>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT seq, taken_at, messages FROM snapshots ORDER BY seq ASC")?;
            let rows = stmt
                .query_map([], map_snapshot_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.iter().map(decode_snapshot).collect()
        })
    }

    /// Zero-based lookup into the history.
    pub fn snapshot_at(&self, index: usize) -> Result<Option<Snapshot>> {
        let Ok(offset) = i64::try_from(index) else {
            return Ok(None);
        };
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT seq, taken_at, messages FROM snapshots ORDER BY seq ASC LIMIT 1 OFFSET ?1",
                    [offset],
                    map_snapshot_row,
                )
                .optional()?;

            row.as_ref().map(decode_snapshot).transpose()
        })
    }

    pub fn snapshot_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
    }

    // -- Post operations --

    /// Validate and append a new post on top of the latest state.
    pub fn create_post(&self, post: NewPost) -> Result<Message> {
        let content = post.content.trim();
        if content.is_empty() {
            return Err(StoreError::Validation("Content is required".into()));
        }
        let created_by = match post.created_by.trim() {
            "" => "anonymous",
            name => name,
        };

        self.mutate_latest(|messages| {
            if let Some(parent_id) = post.parent_id {
                if !messages.iter().any(|m| m.id == parent_id) {
                    return Err(StoreError::NotFound(format!("parent post {}", parent_id)));
                }
            }

            let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
            let now = Utc::now();
            let message = Message {
                id,
                parent_id: post.parent_id,
                created_by: created_by.to_string(),
                created_at: now,
                updated_at: now,
                content: content.to_string(),
                likes: Default::default(),
                is_automated: post.is_automated,
                personality_tag: post.personality_tag.clone(),
            };

            messages.push(message.clone());
            Ok(message)
        })
    }

    /// Add `user_id` to the post's likes if absent, remove it if present.
    pub fn toggle_like(&self, post_id: i64, user_id: &str) -> Result<LikeToggle> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(StoreError::Validation("User is required".into()));
        }

        self.mutate_latest(|messages| {
            let message = find_mut(messages, post_id)?;

            let action = if message.likes.remove(user_id) {
                LikeAction::Unliked
            } else {
                message.likes.insert(user_id.to_string());
                LikeAction::Liked
            };

            Ok(LikeToggle {
                action,
                like_count: message.like_count(),
            })
        })
    }

    /// Replace a post's content and bump its `updated_at`.
    pub fn edit_post(&self, post_id: i64, content: &str) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::Validation("Content is required".into()));
        }

        self.mutate_latest(|messages| {
            let message = find_mut(messages, post_id)?;
            message.content = content.to_string();
            message.updated_at = Utc::now();
            Ok(message.clone())
        })
    }

    /// Read the latest list, apply `f` to a copy, and persist the result as a
    /// new snapshot. Runs as one transaction under the connection lock, so two
    /// callers can never build on the same base state. If `f` fails nothing is
    /// written.
    fn mutate_latest<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Message>) -> Result<T>,
    {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let mut messages = query_latest(&tx)?;
            let out = f(&mut messages)?;

            let seq = insert_snapshot(&tx, &Snapshot::now(messages))?;
            tx.commit()?;

            debug!("Committed snapshot {}", seq);
            Ok(out)
        })
    }
}

fn find_mut(messages: &mut [Message], post_id: i64) -> Result<&mut Message> {
    messages
        .iter_mut()
        .find(|m| m.id == post_id)
        .ok_or_else(|| StoreError::NotFound(format!("post {}", post_id)))
}

fn query_latest(conn: &Connection) -> Result<Vec<Message>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT messages FROM snapshots ORDER BY seq DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn insert_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<i64> {
    let messages = serde_json::to_string(&snapshot.messages)?;
    conn.execute(
        "INSERT INTO snapshots (taken_at, messages) VALUES (?1, ?2)",
        rusqlite::params![encode_time(snapshot.taken_at), messages],
    )?;
    Ok(conn.last_insert_rowid())
}

fn map_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotRow> {
    Ok(SnapshotRow {
        seq: row.get(0)?,
        taken_at: row.get(1)?,
        messages: row.get(2)?,
    })
}

fn decode_snapshot(row: &SnapshotRow) -> Result<Snapshot> {
    let messages = serde_json::from_str(&row.messages)
        .map_err(|e| anyhow::anyhow!("Corrupt snapshot {}: {}", row.seq, e))?;
    Ok(Snapshot {
        taken_at: decode_time(&row.taken_at)?,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn empty_store_has_no_state() {
        let db = db();
        assert!(db.latest().unwrap().is_empty());
        assert!(db.history().unwrap().is_empty());
        assert!(db.snapshot_at(0).unwrap().is_none());
    }

    #[test]
    fn snapshot_index_past_the_end_is_none() {
        let db = db();
        db.create_post(NewPost::human("first", "alice", None)).unwrap();
        db.create_post(NewPost::human("second", "bob", None)).unwrap();

        assert!(db.snapshot_at(1).unwrap().is_some());
        assert!(db.snapshot_at(2).unwrap().is_none());
        assert!(db.snapshot_at(usize::MAX).unwrap().is_none());
    }

    #[test]
    fn first_post_gets_id_one() {
        let db = db();
        let post = db.create_post(NewPost::human("hello world", "alice", None)).unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.parent_id, None);
        assert_eq!(post.created_by, "alice");
        assert!(post.likes.is_empty());
        assert!(!post.is_automated);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(db.latest().unwrap(), vec![post]);
    }

    #[test]
    fn content_is_trimmed_and_blank_author_is_anonymous() {
        let db = db();
        let post = db.create_post(NewPost::human("  hi there \n", "   ", None)).unwrap();
        assert_eq!(post.content, "hi there");
        assert_eq!(post.created_by, "anonymous");
    }

    #[test]
    fn blank_content_is_rejected_without_writing() {
        let db = db();
        let err = db.create_post(NewPost::human(" \t\n", "alice", None)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(db.snapshot_count().unwrap(), 0);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let db = db();
        db.create_post(NewPost::human("root", "alice", None)).unwrap();
        let err = db.create_post(NewPost::human("reply", "bob", Some(42))).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(db.snapshot_count().unwrap(), 1);
    }

    #[test]
    fn ids_strictly_increase_across_history() {
        let db = db();
        let root = db.create_post(NewPost::human("root", "alice", None)).unwrap();
        let mut last = root.id;
        for i in 0..5 {
            let reply = db
                .create_post(NewPost::human(format!("reply {}", i), "bob", Some(root.id)))
                .unwrap();
            assert!(reply.id > last);
            last = reply.id;
        }

        let history = db.history().unwrap();
        assert_eq!(history.len(), 6);
        for (i, snapshot) in history.iter().enumerate() {
            let ids: Vec<i64> = snapshot.messages.iter().map(|m| m.id).collect();
            assert_eq!(ids, (1..=(i as i64 + 1)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn latest_matches_last_appended_snapshot() {
        let db = db();
        let now = Utc::now();
        let make = |id: i64| Message {
            id,
            parent_id: None,
            created_by: "alice".into(),
            created_at: now,
            updated_at: now,
            content: format!("post {}", id),
            likes: Default::default(),
            is_automated: false,
            personality_tag: None,
        };

        let first = Snapshot::now(vec![make(1)]);
        let second = Snapshot::now(vec![make(1), make(2)]);
        db.append(&first).unwrap();
        db.append(&second).unwrap();

        assert_eq!(db.latest().unwrap(), second.messages);
        assert_eq!(db.snapshot_at(0).unwrap().unwrap().messages, first.messages);
        assert_eq!(db.history().unwrap().len(), 2);
    }

    #[test]
    fn toggle_like_is_its_own_inverse() {
        let db = db();
        let post = db.create_post(NewPost::human("hello world", "alice", None)).unwrap();

        let liked = db.toggle_like(post.id, "bob").unwrap();
        assert_eq!(liked, LikeToggle { action: LikeAction::Liked, like_count: 1 });

        let unliked = db.toggle_like(post.id, "bob").unwrap();
        assert_eq!(unliked, LikeToggle { action: LikeAction::Unliked, like_count: 0 });

        assert_eq!(db.latest().unwrap()[0].likes, post.likes);
        // create + two toggles
        assert_eq!(db.snapshot_count().unwrap(), 3);
    }

    #[test]
    fn likes_are_per_user() {
        let db = db();
        let post = db.create_post(NewPost::human("hello", "alice", None)).unwrap();
        db.toggle_like(post.id, "bob").unwrap();
        let toggle = db.toggle_like(post.id, " carol ").unwrap();
        assert_eq!(toggle, LikeToggle { action: LikeAction::Liked, like_count: 2 });

        let likes = &db.latest().unwrap()[0].likes;
        assert!(likes.contains("bob") && likes.contains("carol"));
        assert!(matches!(db.toggle_like(post.id, "  "), Err(StoreError::Validation(_))));
    }

    #[test]
    fn toggle_like_on_missing_post_fails() {
        let db = db();
        let err = db.toggle_like(7, "bob").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn edit_post_updates_content_and_timestamp() {
        let db = db();
        let post = db.create_post(NewPost::human("draft", "alice", None)).unwrap();
        let edited = db.edit_post(post.id, " final ").unwrap();

        assert_eq!(edited.id, post.id);
        assert_eq!(edited.content, "final");
        assert!(edited.updated_at >= post.updated_at);
        assert_eq!(edited.created_at, post.created_at);

        // The earlier snapshot still holds the draft
        assert_eq!(db.snapshot_at(0).unwrap().unwrap().messages[0].content, "draft");
    }

    #[test]
    fn automated_post_keeps_personality_tag() {
        let db = db();
        let root = db.create_post(NewPost::human("root", "alice", None)).unwrap();
        let reply = db
            .create_post(NewPost::automated("neat", "CuriousAI", "curious", Some(root.id)))
            .unwrap();
        assert!(reply.is_automated);
        assert_eq!(reply.created_by, "CuriousAI");
        assert_eq!(reply.personality_tag.as_deref(), Some("curious"));
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let db = Arc::new(db());

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let db = db.clone();
                std::thread::spawn(move || {
                    db.create_post(NewPost::human(format!("post {}", i), "alice", None))
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(db.latest().unwrap().len(), 2);
    }
}
