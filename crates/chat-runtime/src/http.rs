//! HTTP Backend
//!
//! Implementation of `ChatBackend` over reqwest. Works natively and in the
//! browser (reqwest's WASM client wraps `fetch`).

use async_trait::async_trait;
use chat_core::{
    backend::{AskRequest, BodyStream, ChatBackend},
    config::ClientConfig,
    error::{ClientError, Result},
};
use futures::StreamExt;
use reqwest::Client;

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    ask_url: String,
    health_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing reqwest client (connection pool, custom headers)
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            ask_url: config.ask_url(),
            health_url: config.health_url(),
        }
    }

    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for HttpBackend {
    async fn ask(&self, request: &AskRequest) -> Result<BodyStream> {
        tracing::debug!(url = %self.ask_url, "POST ask");

        let response = self
            .client
            .post(&self.ask_url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| ClientError::Stream(e.to_string()))
        });

        Ok(Box::pin(body))
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use chat_core::{BubbleState, ChatClient, ConnectivityStatus, DeliveryMode, MemoryView, Sender};

    use super::*;

    async fn stream_reply(Json(req): Json<AskRequest>) -> Body {
        let chunks: Vec<std::result::Result<Vec<u8>, std::io::Error>> = vec![
            Ok(b"Hi".to_vec()),
            Ok(b" there, ".to_vec()),
            Ok(req.prompt.into_bytes()),
            Ok(b" caf\xC3".to_vec()),
            Ok(b"\xA9".to_vec()),
        ];
        Body::from_stream(futures::stream::iter(chunks))
    }

    async fn json_reply(Json(req): Json<AskRequest>) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "prompt": req.prompt,
            "response": format!("echo: {}", req.prompt),
            "memories_used": [],
            "memory_stored": true,
        }))
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/stream", post(stream_reply))
            .route("/json", post(json_reply))
            .route("/broken", post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
            .route("/health", get(|| async { Json(serde_json::json!({"status": "ok"})) }))
            .route("/sick", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(base_url: &str, ask_path: &str, delivery: DeliveryMode) -> ClientConfig {
        ClientConfig {
            ask_path: ask_path.into(),
            delivery,
            ..ClientConfig::with_base_url(base_url)
        }
    }

    #[tokio::test]
    async fn test_streamed_reply_over_http() {
        let base = spawn_backend().await;
        let config = config(&base, "/stream", DeliveryMode::Streaming);
        let client = ChatClient::from_config(HttpBackend::new(&config), &config);
        let view = MemoryView::new();

        client.submit_prompt(&view, "hello").await.unwrap();

        let transcript = view.transcript();
        assert_eq!(
            transcript.entries(),
            vec![(Sender::User, "hello"), (Sender::Assistant, "Hi there, hello café")]
        );
        assert_eq!(transcript.last().unwrap().state, BubbleState::Complete);
    }

    #[tokio::test]
    async fn test_json_reply_over_http() {
        let base = spawn_backend().await;
        let config = config(&base, "/json", DeliveryMode::WholePayload);
        let client = ChatClient::from_config(HttpBackend::new(&config), &config);
        let view = MemoryView::new();

        client.submit_prompt(&view, "ping").await.unwrap();

        assert_eq!(
            view.transcript().entries(),
            vec![(Sender::User, "ping"), (Sender::Assistant, "echo: ping")]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_not_streamed() {
        let base = spawn_backend().await;
        let backend = HttpBackend::new(&config(&base, "/broken", DeliveryMode::Streaming));

        let result = backend.ask(&AskRequest::new("hello")).await;
        assert!(matches!(result, Err(ClientError::Status(500))));
    }

    #[tokio::test]
    async fn test_json_error_status_appends_failed_bubble() {
        let base = spawn_backend().await;
        let config = config(&base, "/broken", DeliveryMode::WholePayload);
        let client = ChatClient::from_config(HttpBackend::new(&config), &config);
        let view = MemoryView::new();

        let result = client.submit_prompt(&view, "ping").await;
        assert!(matches!(result, Err(ClientError::Status(500))));

        let transcript = view.transcript();
        let notice = ClientError::Status(500).user_message();
        assert_eq!(
            transcript.entries(),
            vec![(Sender::User, "ping"), (Sender::Assistant, notice.as_str())]
        );
        assert_eq!(transcript.last().unwrap().state, BubbleState::Failed);
    }

    #[tokio::test]
    async fn test_health_probe_statuses() {
        let base = spawn_backend().await;
        let view = MemoryView::new();

        let healthy = ChatClient::new(
            HttpBackend::new(&ClientConfig::with_base_url(base.as_str())),
            DeliveryMode::Streaming,
        );
        assert_eq!(healthy.poll_health(&view).await, ConnectivityStatus::Online);

        let sick_config = ClientConfig {
            health_path: "/sick".into(),
            ..ClientConfig::with_base_url(base.as_str())
        };
        let sick = ChatClient::new(HttpBackend::new(&sick_config), DeliveryMode::Streaming);
        assert_eq!(sick.poll_health(&view).await, ConnectivityStatus::Offline);
        assert_eq!(view.status().label(), "● Offline");
        assert_eq!(view.status().css_class(), "offline");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Bind then release a port so nothing is listening on it
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let backend = HttpBackend::new(&ClientConfig::with_base_url(base));
        assert!(matches!(backend.health().await, Err(ClientError::Transport(_))));
        assert!(matches!(
            backend.ask(&AskRequest::new("hi")).await,
            Err(ClientError::Transport(_))
        ));
    }

    #[test]
    fn test_urls_from_config() {
        let backend = HttpBackend::new(&ClientConfig::with_base_url("http://example.test/"));
        assert_eq!(backend.ask_url(), "http://example.test/ask");
        assert_eq!(backend.health_url(), "http://example.test/health");
    }
}
