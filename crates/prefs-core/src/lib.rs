//! prefs-core - Core library for prefs
//!
//! This crate contains the settings records, the observable `SettingsValue`
//! holder, the dialog-style field editor, the screen models built on top of
//! them, and the database layer that persists committed records.

pub mod db;
pub mod debug;
pub mod editor;
pub mod error;
pub mod focus;
pub mod models;
pub mod services;
pub mod state;

pub use editor::{ConfirmOutcome, EditRejection, EditableFieldController, EditableValue};
pub use error::{Error, Result};
pub use models::{DebugSettings, FocusSettings, SettingsRecord, UiSettings};
pub use state::{SettingsValue, SubscriptionId, WeakSettingsValue};
