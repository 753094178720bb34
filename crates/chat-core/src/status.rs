//! Connectivity Status
//!
//! Derived from the most recent health probe. No history is kept: every probe
//! fully determines the next state.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Online/offline classification of the backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    /// No probe has settled yet
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ConnectivityStatus {
    /// State after a probe settles with `outcome`
    pub fn after_probe<T>(outcome: &Result<T>) -> Self {
        if outcome.is_ok() {
            ConnectivityStatus::Online
        } else {
            ConnectivityStatus::Offline
        }
    }

    /// Indicator text
    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityStatus::Unknown => "● Connecting",
            ConnectivityStatus::Online => "● Online",
            ConnectivityStatus::Offline => "● Offline",
        }
    }

    /// Indicator CSS class
    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectivityStatus::Unknown => "unknown",
            ConnectivityStatus::Online => "online",
            ConnectivityStatus::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}
