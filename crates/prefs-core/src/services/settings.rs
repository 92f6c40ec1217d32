//! Shared settings service wrapper used by clients.
//!
//! Owns the database behind an async mutex and binds `SettingsValue`s to it:
//! every committed record is queued to a writer task, so the UI thread never
//! waits on storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::db::{Database, LibSqlSettingsRepository, SettingsRepository};
use crate::models::SettingsRecord;
use crate::state::{SettingsValue, SubscriptionId, WeakSettingsValue};
use crate::{Error, Result};

/// Thread-safe service for loading and persisting settings records.
#[derive(Clone)]
pub struct SettingsService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl SettingsService {
    /// Open a settings service at the given filesystem path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path).await?;
        tracing::info!("Opened settings database at {}", db_path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory settings service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Filesystem path backing this service, if any.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Load a settings record.
    pub async fn load<T: SettingsRecord>(&self) -> Result<T> {
        let db = self.db.lock().await;
        let repo = LibSqlSettingsRepository::new(db.connection());
        repo.load().await
    }

    /// Save a settings record.
    pub async fn save<T: SettingsRecord>(&self, record: &T) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlSettingsRepository::new(db.connection());
        repo.save(record).await
    }

    /// Load a record into a fresh `SettingsValue` and keep it persisted.
    pub async fn load_value<T>(&self) -> Result<(SettingsValue<T>, PersistenceHandle<T>)>
    where
        T: SettingsRecord + Send + Sync,
    {
        let value = SettingsValue::new(self.load::<T>().await?);
        let handle = self.attach(&value)?;
        Ok((value, handle))
    }

    /// Persist every future update of `value`.
    ///
    /// Must be called from within a Tokio runtime. Writes happen in update
    /// order on a background task.
    pub fn attach<T>(&self, value: &SettingsValue<T>) -> Result<PersistenceHandle<T>>
    where
        T: SettingsRecord + Send + Sync,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|error| {
            Error::Runtime(format!("settings persistence requires a Tokio runtime: {error}"))
        })?;

        let (sender, mut receiver) = mpsc::unbounded_channel::<T>();
        let service = self.clone();
        let task = runtime.spawn(async move {
            while let Some(record) = receiver.recv().await {
                match service.save(&record).await {
                    Ok(()) => tracing::debug!(key = T::KEY, "Saved settings"),
                    Err(e) => tracing::error!("Failed to save {} settings: {}", T::KEY, e),
                }
            }
        });

        let subscription = value.subscribe(move |record: &T| {
            if sender.send(record.clone()).is_err() {
                tracing::warn!(key = T::KEY, "Settings writer stopped; update not persisted");
            }
        });

        Ok(PersistenceHandle {
            value: value.downgrade(),
            subscription,
            task,
        })
    }
}

/// Binding between one `SettingsValue` and the settings database.
pub struct PersistenceHandle<T> {
    value: WeakSettingsValue<T>,
    subscription: SubscriptionId,
    task: JoinHandle<()>,
}

impl<T: SettingsRecord> PersistenceHandle<T> {
    /// Stop persisting and wait until every queued record is written.
    pub async fn flush(self) -> Result<()> {
        let Self {
            value,
            subscription,
            task,
        } = self;

        // Dropping the observer drops the sender, which ends the writer loop.
        if let Some(value) = value.upgrade() {
            value.unsubscribe(subscription);
        }
        drop(value);

        task.await
            .map_err(|error| Error::Database(format!("settings writer task failed: {error}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DebugSettings, FocusSettings};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test(flavor = "multi_thread")]
    async fn attached_value_persists_latest_update() {
        let service = SettingsService::open_in_memory().await.unwrap();
        let value = SettingsValue::new(FocusSettings::default());
        let handle = service.attach(&value).unwrap();

        value.update(value.get().with_global_focus_delay(450));
        value.update(value.get().with_short_focus_delay(80));
        handle.flush().await.unwrap();

        let stored: FocusSettings = service.load().await.unwrap();
        assert_eq!(
            stored,
            FocusSettings {
                global_focus_delay: 450,
                animated_focus_delay: 300,
                short_focus_delay: 80,
            }
        );
        assert_eq!(value.subscriber_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn load_value_starts_from_stored_record() {
        let service = SettingsService::open_in_memory().await.unwrap();
        service
            .save(&DebugSettings {
                enabled: true,
                show_all_episodes: false,
            })
            .await
            .unwrap();

        let (value, handle) = service.load_value::<DebugSettings>().await.unwrap();
        assert!(value.get().enabled);

        value.update(DebugSettings::default());
        handle.flush().await.unwrap();

        let stored: DebugSettings = service.load().await.unwrap();
        assert!(!stored.enabled);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn flush_without_updates_writes_nothing() {
        let service = SettingsService::open_in_memory().await.unwrap();
        let value = SettingsValue::new(FocusSettings::default().with_short_focus_delay(5));
        let handle = service.attach(&value).unwrap();

        handle.flush().await.unwrap();

        let stored: FocusSettings = service.load().await.unwrap();
        assert_eq!(stored, FocusSettings::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn open_path_survives_reopen() {
        let tmp = tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("prefs.db");

        let service = SettingsService::open_path(&db_path).await.unwrap();
        assert_eq!(service.db_path(), Some(db_path.as_path()));
        service
            .save(&FocusSettings::default().with_animated_focus_delay(10))
            .await
            .unwrap();
        drop(service);

        let reopened = SettingsService::open_path(&db_path).await.unwrap();
        let stored: FocusSettings = reopened.load().await.unwrap();
        assert_eq!(stored.animated_focus_delay, 10);
    }

    #[test]
    fn attach_outside_runtime_fails() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let service = runtime
            .block_on(SettingsService::open_in_memory())
            .unwrap();
        let value = SettingsValue::new(FocusSettings::default());

        assert!(matches!(service.attach(&value), Err(Error::Runtime(_))));
    }
}
