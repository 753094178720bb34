//! Chat Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{MessageBubble, StatusIndicator};
use crate::view::WebView;

/// Chat page component
#[component]
pub fn ChatPage() -> impl IntoView {
    let config = api::page_config();
    let client = api::chat_client(&config);
    let view = WebView::new();

    let send = {
        let client = client.clone();
        move || {
            let prompt = view.input.get_untracked();
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = client.submit_prompt(&view, &prompt).await {
                    leptos::logging::error!("Prompt failed: {e}");
                }
            });
        }
    };
    let send_on_enter = send.clone();

    // Probe right away, then on every tick until the page goes away
    let probe = move || {
        let client = client.clone();
        spawn_local(async move {
            client.poll_health(&view).await;
        });
    };
    probe();
    match set_interval_with_handle(probe, config.poll_interval()) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => leptos::logging::error!("Could not schedule health checks: {e:?}"),
    }

    let transcript = view.transcript;
    let input = view.input;
    let panel = view.panel;

    view! {
        <div class="chat-container">
            <header class="chat-header">
                <h1>"Chat"</h1>
                <StatusIndicator status=view.status />
            </header>

            <div id="chat-window" class="chat-window" node_ref=panel>
                {move || {
                    transcript.with(|t| {
                        t.bubbles()
                            .iter()
                            .cloned()
                            .map(|bubble| view! { <MessageBubble bubble=bubble /> })
                            .collect::<Vec<_>>()
                    })
                }}
            </div>

            <div class="input-area">
                <input
                    id="user-input"
                    type="text"
                    placeholder="Type a message..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            send_on_enter();
                        }
                    }
                />
                <button id="send-btn" on:click=move |_| send()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
