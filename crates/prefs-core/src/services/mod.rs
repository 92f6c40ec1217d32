//! Shared services used by clients.

mod settings;

pub use settings::{PersistenceHandle, SettingsService};
