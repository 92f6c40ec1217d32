use std::path::Path;

use prefs_core::focus::{FocusDelayStep, FocusField};
use prefs_core::{ConfirmOutcome, FocusSettings};

use crate::commands::common::{format_focus_rows, open_service};
use crate::error::CliError;

pub async fn run_focus_show(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path).await?;
    let (settings, persistence) = service.load_value::<FocusSettings>().await?;
    let step = FocusDelayStep::new(settings);
    let rows = step.rows();
    persistence.flush().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for line in format_focus_rows(&rows) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Run one edit dialog round: open `field`, type `raw`, confirm.
pub async fn run_focus_set(field: FocusField, raw: &str, db_path: &Path) -> Result<u64, CliError> {
    let service = open_service(db_path).await?;
    let (settings, persistence) = service.load_value::<FocusSettings>().await?;
    let mut step = FocusDelayStep::new(settings);

    if !step.begin_edit(field) {
        return Err(CliError::EditInProgress);
    }
    step.on_text_changed(raw);
    let outcome = step.confirm();
    persistence.flush().await?;

    match outcome {
        ConfirmOutcome::Committed(delay) => {
            println!("{}: {delay} ms", field.title());
            Ok(delay)
        }
        ConfirmOutcome::Discarded(reason) => Err(CliError::Rejected { field, reason }),
        ConfirmOutcome::NotEditing => Err(CliError::EditInProgress),
    }
}

pub async fn run_focus_reset(db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path).await?;
    let (settings, persistence) = service.load_value::<FocusSettings>().await?;
    let step = FocusDelayStep::new(settings);

    step.reset_to_defaults();
    persistence.flush().await?;

    for line in format_focus_rows(&step.rows()) {
        println!("{line}");
    }
    Ok(())
}
