//! Focus delay settings step
//!
//! Lists the three focus delays and edits one of them at a time through an
//! edit dialog. Confirmed values replace the whole `FocusSettings` record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::editor::{ConfirmOutcome, EditableFieldController, SessionView};
use crate::error::Error;
use crate::models::FocusSettings;
use crate::state::SettingsValue;

/// One delay of [`FocusSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusField {
    Global,
    Animated,
    Short,
}

impl FocusField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Global, Self::Animated, Self::Short];

    /// Short identifier used on the command line and in JSON output.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Animated => "animated",
            Self::Short => "short",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Global => "Global focus delay",
            Self::Animated => "Animated focus delay",
            Self::Short => "Short focus delay",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Global => "Standard delay for general UI interactions (e.g. a popup menu opening).",
            Self::Animated => "Delay used while waiting for an animation (e.g. a sidebar).",
            Self::Short => "Short delay for quick updates (e.g. search results).",
        }
    }

    /// Current value of this field in `settings`.
    pub const fn read(self, settings: &FocusSettings) -> u64 {
        match self {
            Self::Global => settings.global_focus_delay,
            Self::Animated => settings.animated_focus_delay,
            Self::Short => settings.short_focus_delay,
        }
    }

    /// A copy of `settings` with this field set to `delay`.
    pub const fn apply(self, settings: FocusSettings, delay: u64) -> FocusSettings {
        match self {
            Self::Global => settings.with_global_focus_delay(delay),
            Self::Animated => settings.with_animated_focus_delay(delay),
            Self::Short => settings.with_short_focus_delay(delay),
        }
    }
}

impl fmt::Display for FocusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FocusField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown focus delay '{s}' (expected global, animated or short)"
                ))
            })
    }
}

/// A rendered row of the focus delay list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusDelayRow {
    pub field: FocusField,
    pub title: &'static str,
    pub description: &'static str,
    pub delay_ms: u64,
}

impl FocusDelayRow {
    /// Value as shown next to the row title.
    pub fn display_value(&self) -> String {
        format!("{} ms", self.delay_ms)
    }
}

/// Screen model for editing focus delays.
#[derive(Debug)]
pub struct FocusDelayStep {
    settings: SettingsValue<FocusSettings>,
    editor: EditableFieldController<u64>,
    editing: Option<FocusField>,
}

impl FocusDelayStep {
    pub const fn new(settings: SettingsValue<FocusSettings>) -> Self {
        Self {
            settings,
            editor: EditableFieldController::new(),
            editing: None,
        }
    }

    pub const fn settings(&self) -> &SettingsValue<FocusSettings> {
        &self.settings
    }

    pub fn rows(&self) -> Vec<FocusDelayRow> {
        let current = self.settings.get();
        FocusField::ALL
            .into_iter()
            .map(|field| FocusDelayRow {
                field,
                title: field.title(),
                description: field.description(),
                delay_ms: field.read(&current),
            })
            .collect()
    }

    /// Open the edit dialog for `field`. Returns `false` if another field is
    /// already being edited.
    pub fn begin_edit(&mut self, field: FocusField) -> bool {
        let settings = self.settings.clone();
        let initial = field.read(&settings.get());
        let opened = self.editor.begin_edit(field.title(), initial, move |delay| {
            // Apply on top of the record as it is now, not as it was when the
            // dialog opened.
            settings.update(field.apply(settings.get(), delay));
        });
        if opened {
            self.editing = Some(field);
        }
        opened
    }

    /// Field whose dialog is open.
    pub const fn editing_field(&self) -> Option<FocusField> {
        self.editing
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<SessionView<'_, u64>> {
        self.editor.session()
    }

    pub fn on_text_changed(&mut self, raw: &str) {
        self.editor.on_text_changed(raw);
    }

    pub fn confirm(&mut self) -> ConfirmOutcome<u64> {
        self.editing = None;
        self.editor.confirm()
    }

    pub fn cancel(&mut self) -> bool {
        self.editing = None;
        self.editor.cancel()
    }

    /// Restore every delay to its default.
    pub fn reset_to_defaults(&self) {
        self.settings.update(FocusSettings::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditRejection;
    use pretty_assertions::assert_eq;

    fn step() -> FocusDelayStep {
        FocusDelayStep::new(SettingsValue::new(FocusSettings::default()))
    }

    #[test]
    fn rows_render_current_delays() {
        let step = step();

        let rows = step.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].field, FocusField::Global);
        assert_eq!(rows[0].display_value(), "300 ms");
        assert_eq!(rows[2].title, "Short focus delay");
        assert_eq!(rows[2].display_value(), "100 ms");
    }

    #[test]
    fn confirming_global_edit_updates_only_global() {
        let mut step = step();

        assert!(step.begin_edit(FocusField::Global));
        assert_eq!(step.dialog().unwrap().text, "300");
        step.on_text_changed("450");
        assert_eq!(step.confirm(), ConfirmOutcome::Committed(450));

        assert_eq!(
            step.settings().get(),
            FocusSettings {
                global_focus_delay: 450,
                animated_focus_delay: 300,
                short_focus_delay: 100,
            }
        );
        assert_eq!(step.editing_field(), None);
    }

    #[test]
    fn non_numeric_short_edit_is_discarded() {
        let mut step = step();

        step.begin_edit(FocusField::Short);
        step.on_text_changed("abc");
        let outcome = step.confirm();

        assert_eq!(outcome, ConfirmOutcome::Discarded(EditRejection::Empty));
        assert_eq!(step.settings().get().short_focus_delay, 100);
    }

    #[test]
    fn second_field_cannot_open_while_editing() {
        let mut step = step();

        assert!(step.begin_edit(FocusField::Animated));
        assert!(!step.begin_edit(FocusField::Short));
        assert_eq!(step.editing_field(), Some(FocusField::Animated));

        assert!(step.cancel());
        assert!(step.begin_edit(FocusField::Short));
    }

    #[test]
    fn commit_applies_on_top_of_newer_record() {
        let mut step = step();
        step.begin_edit(FocusField::Short);

        // Another writer changes a different field while the dialog is open.
        step.settings()
            .update(step.settings().get().with_global_focus_delay(1000));
        step.on_text_changed("50");
        step.confirm();

        let current = step.settings().get();
        assert_eq!(current.global_focus_delay, 1000);
        assert_eq!(current.short_focus_delay, 50);
    }

    #[test]
    fn reset_restores_defaults() {
        let step = step();
        step.settings()
            .update(FocusSettings::default().with_animated_focus_delay(9));

        step.reset_to_defaults();

        assert_eq!(step.settings().get(), FocusSettings::default());
    }

    #[test]
    fn parse_field_names() {
        assert_eq!("Global".parse::<FocusField>().unwrap(), FocusField::Global);
        assert_eq!(" short ".parse::<FocusField>().unwrap(), FocusField::Short);
        assert!("medium".parse::<FocusField>().is_err());
    }
}
