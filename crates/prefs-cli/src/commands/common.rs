use std::env;
use std::path::{Path, PathBuf};

use prefs_core::debug::Toaster;
use prefs_core::focus::FocusDelayRow;
use prefs_core::services::SettingsService;
use prefs_core::{DebugSettings, UiSettings};
use serde::Serialize;

use crate::error::CliError;

/// Prints toasts as plain output lines.
pub struct ConsoleToaster;

impl Toaster for ConsoleToaster {
    fn toast(&self, message: &str) {
        println!("{message}");
    }
}

#[derive(Debug, Serialize)]
pub struct DebugStatusItem {
    pub debug_mode: bool,
    pub show_all_episodes: bool,
    pub onboarding_completed: bool,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("PREFS_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prefs")
        .join("prefs.db")
}

pub async fn open_service(db_path: &Path) -> Result<SettingsService, CliError> {
    Ok(SettingsService::open_path(db_path).await?)
}

pub fn format_focus_rows(rows: &[FocusDelayRow]) -> Vec<String> {
    let width = rows.iter().map(|row| row.title.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| format!("{:<width$}  {}", row.title, row.display_value()))
        .collect()
}

pub const fn debug_status(debug: DebugSettings, ui: UiSettings) -> DebugStatusItem {
    DebugStatusItem {
        debug_mode: debug.enabled,
        show_all_episodes: debug.show_all_episodes,
        onboarding_completed: ui.onboarding_completed,
    }
}

pub fn format_debug_lines(status: &DebugStatusItem) -> Vec<String> {
    vec![
        format!("debug mode            {}", on_off(status.debug_mode)),
        format!("show all episodes     {}", on_off(status.show_all_episodes)),
        format!("onboarding completed  {}", yes_no(status.onboarding_completed)),
    ]
}

const fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
