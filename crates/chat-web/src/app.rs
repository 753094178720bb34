//! Main App Component

use leptos::prelude::*;

use crate::pages::ChatPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <ChatPage />
        </main>
    }
}
