//! Debug settings tab
//!
//! Developer switches plus a few maintenance actions. Everything outside the
//! settings records (user data, sessions, clipboard, toasts, network state) is
//! reached through the traits below and handed in by the caller.

use std::rc::Rc;

use crate::error::Result;
use crate::models::{DebugSettings, UiSettings};
use crate::state::SettingsValue;

pub const ONBOARDING_RESET_MESSAGE: &str = "Onboarding will be shown on next launch";
pub const LOGGED_OUT_MESSAGE: &str = "Logged out";

/// Local cache of the signed-in user's profile.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
    /// Forget the cached profile of the current user.
    async fn clear_self_info(&self) -> Result<()>;
}

/// Source of the active session.
#[allow(async_fn_in_trait)]
pub trait SessionManager {
    /// Access token of the current session, if signed in with one.
    async fn access_token(&self) -> Option<String>;
}

pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Transient user-facing notifications.
pub trait Toaster {
    fn toast(&self, message: &str);
}

pub trait MeteredNetworkDetector {
    /// Whether the platform can limit uploads on metered networks at all.
    fn supports_limit_upload_on_metered_network(&self) -> bool;

    /// Whether the current network is metered.
    fn is_metered(&self) -> bool;
}

/// Account and platform collaborators used by [`DebugActions`].
pub struct DebugServices<U, S> {
    pub users: U,
    pub sessions: S,
    pub clipboard: Box<dyn Clipboard>,
    pub network: Box<dyn MeteredNetworkDetector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeteredNetworkStatus {
    pub supports_limit_upload: bool,
    pub is_metered: bool,
}

/// Screen model for the debug tab's settings switches.
pub struct DebugTab {
    debug: SettingsValue<DebugSettings>,
    ui: SettingsValue<UiSettings>,
    toaster: Rc<dyn Toaster>,
}

impl DebugTab {
    pub fn new(
        debug: SettingsValue<DebugSettings>,
        ui: SettingsValue<UiSettings>,
        toaster: Rc<dyn Toaster>,
    ) -> Self {
        Self { debug, ui, toaster }
    }

    pub fn debug_settings(&self) -> DebugSettings {
        self.debug.get()
    }

    pub fn ui_settings(&self) -> UiSettings {
        self.ui.get()
    }

    /// Turn debug mode on or off. `on_disable` runs before the record changes
    /// when turning it off.
    pub fn set_debug_mode(&self, enabled: bool, on_disable: impl FnOnce()) {
        if !enabled {
            on_disable();
        }
        self.debug.update(DebugSettings {
            enabled,
            ..self.debug.get()
        });
        tracing::info!(enabled, "Debug mode changed");
    }

    pub fn set_show_all_episodes(&self, show_all_episodes: bool) {
        self.debug.update(DebugSettings {
            show_all_episodes,
            ..self.debug.get()
        });
    }

    /// Mark onboarding as not completed so it runs again on next launch.
    pub fn reset_onboarding(&self) {
        self.ui.update(UiSettings {
            onboarding_completed: false,
            ..self.ui.get()
        });
        self.toaster.toast(ONBOARDING_RESET_MESSAGE);
    }
}

/// Account and network actions offered next to the debug switches.
pub struct DebugActions<U, S> {
    services: DebugServices<U, S>,
    toaster: Rc<dyn Toaster>,
}

impl<U: UserRepository, S: SessionManager> DebugActions<U, S> {
    pub fn new(services: DebugServices<U, S>, toaster: Rc<dyn Toaster>) -> Self {
        Self { services, toaster }
    }

    pub async fn logout(&self) -> Result<()> {
        self.services.users.clear_self_info().await?;
        tracing::info!("Cleared self info");
        self.toaster.toast(LOGGED_OUT_MESSAGE);
        Ok(())
    }

    /// Copy the session's access token to the clipboard and return what was
    /// copied (`"null"` without a token).
    pub async fn copy_access_token(&self) -> Result<String> {
        let text = self
            .services
            .sessions
            .access_token()
            .await
            .unwrap_or_else(|| "null".to_string());
        self.services.clipboard.set_text(&text)?;
        self.toaster.toast(&format!("Copied: {text}"));
        Ok(text)
    }

    pub fn metered_network_status(&self) -> MeteredNetworkStatus {
        MeteredNetworkStatus {
            supports_limit_upload: self
                .services
                .network
                .supports_limit_upload_on_metered_network(),
            is_metered: self.services.network.is_metered(),
        }
    }
}
