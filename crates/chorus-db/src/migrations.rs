use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshots (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            taken_at    TEXT NOT NULL,
            messages    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notifications (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            message         TEXT NOT NULL,
            related_post_id INTEGER,
            created_at      TEXT NOT NULL,
            seen            INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_seen
            ON notifications(seen);

        -- Single free-form settings document
        CREATE TABLE IF NOT EXISTS settings (
            id      INTEGER PRIMARY KEY CHECK (id = 1),
            body    TEXT NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
