//! # chat-core
//!
//! Transport- and UI-agnostic core of the chat client.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ChatClient                            │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐  │
//! │  │ submit_prompt│──▶│  DeliveryMode    │──▶│ ChatBackend  │  │
//! │  │ poll_health  │   │ streaming | json │   │  (Strategy)  │  │
//! │  └──────┬───────┘   └──────────────────┘   └──────────────┘  │
//! │         ▼                                                     │
//! │  ┌──────────────────────────────────────────────┐            │
//! │  │ ChatView: transcript · input · status badge  │            │
//! │  └──────────────────────────────────────────────┘            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend and the view are both passed in, so the same operations drive
//! the browser frontend, the terminal host, and the tests.

pub mod backend;
pub mod client;
pub mod config;
pub mod decoder;
pub mod delivery;
pub mod error;
pub mod message;
pub mod status;
pub mod view;

pub use backend::{AskRequest, AskResponse, BodyStream, ChatBackend};
pub use client::ChatClient;
pub use config::ClientConfig;
pub use decoder::Utf8StreamDecoder;
pub use delivery::DeliveryMode;
pub use error::{ClientError, Result};
pub use message::{Bubble, BubbleId, BubbleState, Sender, Transcript};
pub use status::ConnectivityStatus;
pub use view::{ChatView, MemoryView};
