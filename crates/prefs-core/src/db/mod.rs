//! Database layer for prefs

mod connection;
mod migrations;
mod settings_repository;

pub use connection::Database;
pub use settings_repository::{LibSqlSettingsRepository, SettingsRepository};
