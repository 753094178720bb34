//! Client Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::delivery::DeliveryMode;
use crate::error::{ClientError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_ask_path")]
    pub ask_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default)]
    pub delivery: DeliveryMode,

    /// Health probe period in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Assistant bubble text while a streamed reply has not started
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_ask_path() -> String {
    "/ask".into()
}

fn default_health_path() -> String {
    "/health".into()
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_placeholder() -> String {
    "…".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ask_path: default_ask_path(),
            health_path: default_health_path(),
            delivery: DeliveryMode::default(),
            poll_interval_ms: default_poll_interval_ms(),
            placeholder: default_placeholder(),
        }
    }
}

impl ClientConfig {
    /// Defaults for a backend at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read `CHAT_*` environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("CHAT_BASE_URL") {
            config.base_url = url;
        }
        if let Some(path) = lookup("CHAT_ASK_PATH") {
            config.ask_path = path;
        }
        if let Some(path) = lookup("CHAT_HEALTH_PATH") {
            config.health_path = path;
        }
        if let Some(mode) = lookup("CHAT_DELIVERY_MODE") {
            config.delivery = mode.parse()?;
        }
        if let Some(ms) = lookup("CHAT_POLL_INTERVAL_MS") {
            config.poll_interval_ms = ms
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("CHAT_POLL_INTERVAL_MS is not a number: '{ms}'")))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ClientError::Config("poll interval must be positive".into()));
        }
        Ok(())
    }

    pub fn ask_url(&self) -> String {
        join_url(&self.base_url, &self.ask_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
