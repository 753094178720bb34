//! Chat Client Operations
//!
//! [`ChatClient`] owns a backend and a delivery mode and runs the two
//! operations of the client against whatever [`ChatView`] the frontend passes
//! in: submitting a prompt and probing backend health.
//!
//! Submissions are not serialized. A second prompt sent while the first reply
//! is still streaming gets its own bubbles; transcript order is creation order.

use crate::backend::{AskRequest, ChatBackend};
use crate::config::ClientConfig;
use crate::delivery::{consume_json, consume_stream, DeliveryMode};
use crate::error::{ClientError, Result};
use crate::message::{BubbleId, BubbleState, Sender};
use crate::status::ConnectivityStatus;
use crate::view::ChatView;

#[derive(Clone, Debug)]
pub struct ChatClient<B> {
    backend: B,
    delivery: DeliveryMode,
    placeholder: String,
}

impl<B: ChatBackend> ChatClient<B> {
    pub fn new(backend: B, delivery: DeliveryMode) -> Self {
        Self {
            backend,
            delivery,
            placeholder: ClientConfig::default().placeholder,
        }
    }

    pub fn from_config(backend: B, config: &ClientConfig) -> Self {
        Self {
            backend,
            delivery: config.delivery,
            placeholder: config.placeholder.clone(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Submit the content of the input field.
    ///
    /// Whitespace-only input is ignored: `Ok(None)`, nothing rendered, nothing
    /// sent. Otherwise the user bubble is rendered and the input cleared before
    /// the request goes out, and the id of the assistant bubble is returned.
    /// On failure the assistant bubble is left in [`BubbleState::Failed`]
    /// showing [`ClientError::user_message`], and the error is returned.
    pub async fn submit_prompt<V>(&self, view: &V, input: &str) -> Result<Option<BubbleId>>
    where
        V: ChatView + ?Sized,
    {
        let prompt = input.trim_matches(is_blank);
        if prompt.is_empty() {
            tracing::debug!("Ignoring empty prompt");
            return Ok(None);
        }

        view.append(Sender::User, prompt, BubbleState::Complete);
        view.clear_input();
        view.scroll_to_latest();

        let request = AskRequest::new(prompt);
        tracing::debug!(mode = %self.delivery, chars = prompt.chars().count(), "Submitting prompt");

        let reply = match self.delivery {
            DeliveryMode::Streaming => self.deliver_streaming(view, &request).await,
            DeliveryMode::WholePayload => self.deliver_whole(view, &request).await,
        };
        reply.map(Some)
    }

    async fn deliver_streaming<V>(&self, view: &V, request: &AskRequest) -> Result<BubbleId>
    where
        V: ChatView + ?Sized,
    {
        let reply = view.append(Sender::Assistant, &self.placeholder, BubbleState::Pending);
        view.scroll_to_latest();

        let mut text = String::new();
        let outcome = async {
            let body = self.backend.ask(request).await?;
            consume_stream(body, &mut text, |partial| {
                view.update(reply, partial, BubbleState::Pending);
                view.scroll_to_latest();
            })
            .await
        }
        .await;

        match outcome {
            Ok(()) => {
                view.update(reply, &text, BubbleState::Complete);
                view.scroll_to_latest();
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!("Streaming reply failed: {}", err);
                let notice = failure_notice(&text, &err);
                view.update(reply, &notice, BubbleState::Failed);
                view.scroll_to_latest();
                Err(err)
            }
        }
    }

    async fn deliver_whole<V>(&self, view: &V, request: &AskRequest) -> Result<BubbleId>
    where
        V: ChatView + ?Sized,
    {
        let outcome = async {
            let body = self.backend.ask(request).await?;
            consume_json(body).await
        }
        .await;

        match outcome {
            Ok(reply_text) => {
                let reply = view.append(Sender::Assistant, &reply_text, BubbleState::Complete);
                view.scroll_to_latest();
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!("Reply request failed: {}", err);
                view.append(Sender::Assistant, &err.user_message(), BubbleState::Failed);
                view.scroll_to_latest();
                Err(err)
            }
        }
    }

    /// Probe the backend once and push the resulting status to the indicator
    pub async fn poll_health<V>(&self, view: &V) -> ConnectivityStatus
    where
        V: ChatView + ?Sized,
    {
        let outcome = self.backend.health().await;
        if let Err(e) = &outcome {
            tracing::warn!("Health check failed: {}", e);
        }

        let status = ConnectivityStatus::after_probe(&outcome);
        view.set_status(status);
        status
    }
}

/// Whitespace, plus the byte-order mark that editors and pastes leave behind
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Text left in a streamed bubble whose reply failed
fn failure_notice(partial: &str, err: &ClientError) -> String {
    if partial.is_empty() {
        err.user_message()
    } else {
        format!("{partial}\n\n{}", err.user_message())
    }
}
