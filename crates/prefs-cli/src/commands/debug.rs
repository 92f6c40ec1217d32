use std::path::Path;
use std::rc::Rc;

use prefs_core::debug::DebugTab;
use prefs_core::services::{PersistenceHandle, SettingsService};
use prefs_core::{DebugSettings, UiSettings};

use crate::commands::common::{
    debug_status, format_debug_lines, open_service, ConsoleToaster, DebugStatusItem,
};
use crate::error::CliError;

struct LoadedDebugTab {
    tab: DebugTab,
    debug: PersistenceHandle<DebugSettings>,
    ui: PersistenceHandle<UiSettings>,
}

impl LoadedDebugTab {
    async fn open(service: &SettingsService) -> Result<Self, CliError> {
        let (debug_value, debug) = service.load_value::<DebugSettings>().await?;
        let (ui_value, ui) = service.load_value::<UiSettings>().await?;
        Ok(Self {
            tab: DebugTab::new(debug_value, ui_value, Rc::new(ConsoleToaster)),
            debug,
            ui,
        })
    }

    fn status(&self) -> DebugStatusItem {
        debug_status(self.tab.debug_settings(), self.tab.ui_settings())
    }

    async fn finish(self) -> Result<DebugStatusItem, CliError> {
        let status = self.status();
        self.debug.flush().await?;
        self.ui.flush().await?;
        Ok(status)
    }
}

pub async fn run_debug_show(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path).await?;
    let status = LoadedDebugTab::open(&service).await?.finish().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        for line in format_debug_lines(&status) {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn run_debug_mode(enabled: bool, db_path: &Path) -> Result<DebugStatusItem, CliError> {
    let service = open_service(db_path).await?;
    let loaded = LoadedDebugTab::open(&service).await?;

    loaded.tab.set_debug_mode(enabled, || {
        tracing::info!("Debug mode disabled; debug-only switches stay stored");
    });
    let status = loaded.finish().await?;

    println!("debug mode {}", if status.debug_mode { "on" } else { "off" });
    Ok(status)
}

pub async fn run_debug_episodes(show_all: bool, db_path: &Path) -> Result<DebugStatusItem, CliError> {
    let service = open_service(db_path).await?;
    let loaded = LoadedDebugTab::open(&service).await?;

    loaded.tab.set_show_all_episodes(show_all);
    let status = loaded.finish().await?;

    println!(
        "show all episodes {}",
        if status.show_all_episodes { "on" } else { "off" }
    );
    Ok(status)
}

pub async fn run_onboarding_reset(db_path: &Path) -> Result<DebugStatusItem, CliError> {
    let service = open_service(db_path).await?;
    let loaded = LoadedDebugTab::open(&service).await?;

    loaded.tab.reset_onboarding();
    loaded.finish().await
}
