//! # chat-runtime
//!
//! Runtime integrations for the chat client.
//!
//! - **HttpBackend**: `ChatBackend` over reqwest, native and WASM
//! - **HealthPoller**: owned, cancellable health-probe task (native only; the
//!   browser frontend schedules its probes with the page's timers)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_runtime::{HealthPoller, HttpBackend};
//!
//! let config = ClientConfig::from_env()?;
//! let client = Arc::new(ChatClient::from_config(HttpBackend::new(&config), &config));
//! let poller = HealthPoller::spawn(client.clone(), view.clone(), config.poll_interval());
//! ```

pub mod http;

#[cfg(not(target_arch = "wasm32"))]
pub mod poller;

pub use http::HttpBackend;

#[cfg(not(target_arch = "wasm32"))]
pub use poller::HealthPoller;

// Re-export core types for convenience
pub use chat_core::{
    ChatBackend, ChatClient, ChatView, ClientConfig, ClientError, ConnectivityStatus,
    DeliveryMode, Result, Sender, Transcript,
};
