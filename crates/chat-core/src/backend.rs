//! Backend Strategy
//!
//! The client talks to its backend only through [`ChatBackend`], so the HTTP
//! implementation, test doubles, and any future transport are interchangeable.
//!
//! ## Wire contract
//!
//! ```text
//! POST /ask     {"prompt": "..."}  ──▶  streamed text        (streaming mode)
//!                                  ──▶  {"response": "..."}  (whole-payload mode)
//! GET  /health                     ──▶  any status; only success/failure matters
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw response body as a sequence of byte chunks
#[cfg(not(target_arch = "wasm32"))]
pub type BodyStream = futures::stream::BoxStream<'static, Result<Vec<u8>>>;

/// Raw response body as a sequence of byte chunks
#[cfg(target_arch = "wasm32")]
pub type BodyStream = futures::stream::LocalBoxStream<'static, Result<Vec<u8>>>;

/// Request body for the ask endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub prompt: String,
}

impl AskRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }
}

/// Whole-payload reply from the ask endpoint.
///
/// Backends may send extra fields (echoed prompt, memories used); they are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

/// Strategy trait for chat backends
///
/// Implementations fold a non-success status into `Err` for both methods.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatBackend {
    /// Submit a prompt and hand back the response body once headers arrive
    async fn ask(&self, request: &AskRequest) -> Result<BodyStream>;

    /// Probe backend health; `Ok` iff the status was a success
    async fn health(&self) -> Result<()>;
}
