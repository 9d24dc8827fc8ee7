use chorus_types::models::Notification;
use chrono::Utc;

use crate::Database;
use crate::error::Result;
use crate::models::{NotificationRow, decode_time, encode_time};

impl Database {
    // -- Notification log --

    pub fn push_notification(&self, message: &str, related_post_id: Option<i64>) -> Result<Notification> {
        let created_at = Utc::now();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notifications (message, related_post_id, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![message, related_post_id, encode_time(created_at)],
            )?;

            Ok(Notification {
                id: conn.last_insert_rowid(),
                message: message.to_string(),
                related_post_id,
                created_at,
                seen: false,
            })
        })
    }

    /// Whole log, oldest first.
    pub fn notifications(&self) -> Result<Vec<Notification>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message, related_post_id, created_at, seen
                 FROM notifications
                 ORDER BY id ASC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(NotificationRow {
                        id: row.get(0)?,
                        message: row.get(1)?,
                        related_post_id: row.get(2)?,
                        created_at: row.get(3)?,
                        seen: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|row| -> Result<Notification> {
                    Ok(Notification {
                        created_at: decode_time(&row.created_at)?,
                        id: row.id,
                        message: row.message,
                        related_post_id: row.related_post_id,
                        seen: row.seen,
                    })
                })
                .collect()
        })
    }

    /// Flag every unseen notification as seen. Returns how many changed.
    pub fn mark_all_seen(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let updated = conn.execute("UPDATE notifications SET seen = 1 WHERE seen = 0", [])?;
            Ok(updated)
        })
    }

    pub fn unseen_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM notifications WHERE seen = 0",
                [],
                |row| row.get(0),
            )?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
    }
}
