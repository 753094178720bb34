//! Reactive view handles
//!
//! Implements [`ChatView`] over Leptos signals so the core client can drive
//! the page directly.

use chat_core::{BubbleId, BubbleState, ChatView, ConnectivityStatus, Sender, Transcript};
use leptos::html;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct WebView {
    pub transcript: RwSignal<Transcript>,
    pub input: RwSignal<String>,
    pub status: RwSignal<ConnectivityStatus>,
    pub panel: NodeRef<html::Div>,
}

impl WebView {
    pub fn new() -> Self {
        Self {
            transcript: RwSignal::new(Transcript::new()),
            input: RwSignal::new(String::new()),
            status: RwSignal::new(ConnectivityStatus::Unknown),
            panel: NodeRef::new(),
        }
    }
}

impl Default for WebView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for WebView {
    fn append(&self, sender: Sender, text: &str, state: BubbleState) -> BubbleId {
        let mut id = BubbleId::default();
        self.transcript.update(|t| id = t.push(sender, text, state));
        id
    }

    fn update(&self, id: BubbleId, text: &str, state: BubbleState) {
        self.transcript.update(|t| {
            if !t.replace(id, text, state) {
                leptos::logging::warn!("no bubble {id} to update");
            }
        });
    }

    fn clear_input(&self) {
        self.input.set(String::new());
    }

    fn scroll_to_latest(&self) {
        // Wait for the new bubble to be laid out
        let panel = self.panel;
        request_animation_frame(move || {
            if let Some(el) = panel.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    }

    fn set_status(&self, status: ConnectivityStatus) {
        self.status.set(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_follow_view_calls() {
        Owner::new().with(|| {
            let view = WebView::new();
            view.input.set("hello".into());

            let user = view.append(Sender::User, "hello", BubbleState::Complete);
            view.clear_input();
            let reply = view.append(Sender::Assistant, "…", BubbleState::Pending);
            view.update(reply, "Hi!", BubbleState::Complete);
            view.set_status(ConnectivityStatus::Online);

            let transcript = view.transcript.get_untracked();
            assert_eq!(user.index(), 0);
            assert_eq!(
                transcript.entries(),
                vec![(Sender::User, "hello"), (Sender::Assistant, "Hi!")]
            );
            assert!(view.input.get_untracked().is_empty());
            assert_eq!(view.status.get_untracked(), ConnectivityStatus::Online);
        });
    }
}
