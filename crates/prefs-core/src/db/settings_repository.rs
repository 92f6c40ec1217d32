//! Settings repository implementation

use crate::error::Result;
use crate::models::SettingsRecord;
use libsql::Connection;

/// Trait for settings storage operations (async)
#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    /// Load a record, falling back to its defaults when nothing usable is stored
    async fn load<T: SettingsRecord>(&self) -> Result<T>;

    /// Save a record, replacing whatever was stored under its key
    async fn save<T: SettingsRecord>(&self, record: &T) -> Result<()>;
}

/// libSQL implementation of `SettingsRepository`
///
/// Each record is stored as one JSON document under `SettingsRecord::KEY`.
pub struct LibSqlSettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlSettingsRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for LibSqlSettingsRepository<'_> {
    async fn load<T: SettingsRecord>(&self) -> Result<T> {
        let Some(value) = self.get_setting(T::KEY).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&value) {
            Ok(record) => Ok(record),
            Err(error) => {
                tracing::warn!(
                    key = T::KEY,
                    "Stored settings are unreadable, using defaults: {}",
                    error
                );
                Ok(T::default())
            }
        }
    }

    async fn save<T: SettingsRecord>(&self, record: &T) -> Result<()> {
        let value = serde_json::to_string(record)?;
        self.set_setting(T::KEY, &value).await
    }
}

impl LibSqlSettingsRepository<'_> {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM settings WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, value, updated_at)
                 VALUES (?, ?, CAST(strftime('%s','now') AS INTEGER) * 1000)",
                [key, value],
            )
            .await?;
        Ok(())
    }
}
