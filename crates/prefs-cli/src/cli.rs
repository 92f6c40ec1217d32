use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use prefs_core::focus::FocusField;

#[derive(Parser)]
#[command(name = "prefs")]
#[command(about = "Inspect and edit client settings from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local settings database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Focus delays
    Focus {
        #[command(subcommand)]
        command: FocusCommands,
    },
    /// Debug switches
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
    /// Onboarding state
    Onboarding {
        #[command(subcommand)]
        command: OnboardingCommands,
    },
}

#[derive(Subcommand)]
pub enum FocusCommands {
    /// Show the current focus delays
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set one focus delay in milliseconds
    Set {
        /// Which delay to change
        #[arg(value_enum)]
        field: FocusFieldArg,
        /// New value; non-digit characters are ignored
        value: String,
    },
    /// Restore all focus delays to their defaults
    Reset,
}

#[derive(Subcommand)]
pub enum DebugCommands {
    /// Show debug and onboarding switches
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn debug mode on or off
    Mode {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Show all episodes regardless of filters
    Episodes {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
pub enum OnboardingCommands {
    /// Show onboarding again on next launch
    Reset,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FocusFieldArg {
    Global,
    Animated,
    Short,
}

impl From<FocusFieldArg> for FocusField {
    fn from(value: FocusFieldArg) -> Self {
        match value {
            FocusFieldArg::Global => Self::Global,
            FocusFieldArg::Animated => Self::Animated,
            FocusFieldArg::Short => Self::Short,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}
