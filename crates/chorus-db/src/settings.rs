use rusqlite::OptionalExtension;
use serde_json::Value;

use crate::Database;
use crate::error::{Result, StoreError};

impl Database {
    // -- Settings --

    /// Free-form feature toggles. Empty object until first written.
    pub fn settings(&self) -> Result<Value> {
        self.with_conn(|conn| {
            let body: Option<String> = conn
                .query_row("SELECT body FROM settings WHERE id = 1", [], |row| row.get(0))
                .optional()?;

            match body {
                Some(body) => Ok(serde_json::from_str(&body)?),
                None => Ok(Value::Object(Default::default())),
            }
        })
    }

    /// Replace the whole settings document.
    pub fn put_settings(&self, settings: Value) -> Result<Value> {
        if !settings.is_object() {
            return Err(StoreError::Validation("Settings must be a JSON object".into()));
        }

        let body = serde_json::to_string(&settings)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (id, body) VALUES (1, ?1)
                 ON CONFLICT(id) DO UPDATE SET body = excluded.body",
                [&body],
            )?;
            Ok(())
        })?;

        Ok(settings)
    }
}
