//! Settings records
//!
//! Every record is an immutable value with a total default. Edits build a new
//! record from the old one and replace it wholesale.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A serializable settings aggregate that can be held in a `SettingsValue`
/// and stored by a `SettingsRepository`.
pub trait SettingsRecord:
    Clone + Debug + PartialEq + Default + Serialize + DeserializeOwned + 'static
{
    /// Stable storage key for this record type.
    const KEY: &'static str;
}

/// Focus delays applied before moving focus, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// Standard delay for general UI interactions (e.g. a popup menu opening)
    pub global_focus_delay: u64,
    /// Delay used while waiting for an animation (e.g. a sidebar)
    pub animated_focus_delay: u64,
    /// Short delay for quick updates (e.g. search results)
    pub short_focus_delay: u64,
}

impl FocusSettings {
    #[must_use]
    pub const fn with_global_focus_delay(self, delay: u64) -> Self {
        Self {
            global_focus_delay: delay,
            ..self
        }
    }

    #[must_use]
    pub const fn with_animated_focus_delay(self, delay: u64) -> Self {
        Self {
            animated_focus_delay: delay,
            ..self
        }
    }

    #[must_use]
    pub const fn with_short_focus_delay(self, delay: u64) -> Self {
        Self {
            short_focus_delay: delay,
            ..self
        }
    }
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            global_focus_delay: 300,
            animated_focus_delay: 300,
            short_focus_delay: 100,
        }
    }
}

impl SettingsRecord for FocusSettings {
    const KEY: &'static str = "focus";
}

/// Developer-only switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Whether debug mode is enabled
    pub enabled: bool,
    /// Show every episode regardless of airing/filter state
    pub show_all_episodes: bool,
}

impl SettingsRecord for DebugSettings {
    const KEY: &'static str = "debug";
}

/// General UI state that outlives a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the onboarding wizard has been completed
    pub onboarding_completed: bool,
}

impl SettingsRecord for UiSettings {
    const KEY: &'static str = "ui";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_focus_settings_default() {
        let settings = FocusSettings::default();
        assert_eq!(settings.global_focus_delay, 300);
        assert_eq!(settings.animated_focus_delay, 300);
        assert_eq!(settings.short_focus_delay, 100);
    }

    #[test]
    fn test_focus_settings_with_overrides_single_field() {
        let updated = FocusSettings::default().with_animated_focus_delay(500);
        assert_eq!(
            updated,
            FocusSettings {
                global_focus_delay: 300,
                animated_focus_delay: 500,
                short_focus_delay: 100,
            }
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: FocusSettings = serde_json::from_str(r#"{"short_focus_delay": 50}"#).unwrap();
        assert_eq!(settings.global_focus_delay, 300);
        assert_eq!(settings.short_focus_delay, 50);

        let debug: DebugSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(debug, DebugSettings::default());
    }

    #[test]
    fn test_record_keys_are_distinct() {
        assert_ne!(FocusSettings::KEY, DebugSettings::KEY);
        assert_ne!(DebugSettings::KEY, UiSettings::KEY);
        assert_ne!(FocusSettings::KEY, UiSettings::KEY);
    }
}
