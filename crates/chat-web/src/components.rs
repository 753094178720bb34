//! UI Components

use chat_core::{Bubble, ConnectivityStatus};
use leptos::prelude::*;

/// Message bubble component
#[component]
pub fn MessageBubble(bubble: Bubble) -> impl IntoView {
    view! {
        <div class=bubble.css_class() data-id=bubble.id.index()>
            {bubble.text.clone()}
        </div>
    }
}

/// Online/offline badge
#[component]
pub fn StatusIndicator(status: RwSignal<ConnectivityStatus>) -> impl IntoView {
    view! {
        <span
            id="status-indicator"
            class=move || format!("status {}", status.get().css_class())
        >
            {move || status.get().label()}
        </span>
    }
}
