//! API Client

use chat_core::{ChatClient, ClientConfig, DeliveryMode};
use chat_runtime::HttpBackend;

/// Client configuration for the page that loaded us.
///
/// The backend is the page origin; the delivery mode is fixed at build time
/// through `CHAT_DELIVERY_MODE` (`streaming` or `json`).
pub fn page_config() -> ClientConfig {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8000".into());

    let mut config = ClientConfig::with_base_url(origin);
    config.delivery = build_delivery_mode();
    config
}

fn build_delivery_mode() -> DeliveryMode {
    match option_env!("CHAT_DELIVERY_MODE").map(str::parse::<DeliveryMode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            leptos::logging::warn!("{e}; falling back to streaming");
            DeliveryMode::Streaming
        }
        None => DeliveryMode::default(),
    }
}

pub fn chat_client(config: &ClientConfig) -> ChatClient<HttpBackend> {
    ChatClient::from_config(HttpBackend::new(config), config)
}
