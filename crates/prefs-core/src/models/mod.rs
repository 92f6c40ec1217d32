//! Data models for prefs

mod settings;

pub use settings::{DebugSettings, FocusSettings, SettingsRecord, UiSettings};
