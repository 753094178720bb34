//! chat-client Web Frontend
//!
//! Leptos-based WASM frontend: transcript panel, prompt input, and backend
//! status indicator.

mod api;
mod app;
mod components;
mod pages;
mod view;

pub use app::App;
pub use view::WebView;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
