//! chat-client terminal host
//!
//! Reads prompts from stdin, prints replies as they arrive, and keeps a
//! background health probe running against the backend.

mod view;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use chat_core::{ChatClient, ClientConfig};
use chat_runtime::{HealthPoller, HttpBackend};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::view::TerminalView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so replies on stdout stay clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env().context("invalid CHAT_* configuration")?;
    tracing::info!(
        ask = %config.ask_url(),
        health = %config.health_url(),
        delivery = %config.delivery,
        "Starting chat client"
    );

    let client = Arc::new(ChatClient::from_config(HttpBackend::new(&config), &config));
    let view = Arc::new(TerminalView::stdout());
    let poller = HealthPoller::spawn(client.clone(), view.clone(), config.poll_interval());
    tracing::info!("Probing backend health every {:?}", poller.period());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if matches!(line.trim(), "/quit" | "/exit") {
                    break;
                }
                let client = client.clone();
                let view = view.clone();
                in_flight.spawn(async move {
                    if let Err(e) = client.submit_prompt(view.as_ref(), &line).await {
                        tracing::debug!("Submission ended with error: {}", e);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                in_flight.abort_all();
                break;
            }
        }
    }

    // Let replies still streaming finish printing; ctrl-c gives up on them
    if !drain(&mut in_flight, tokio::signal::ctrl_c()).await {
        tracing::info!("Interrupted");
        in_flight.abort_all();
    }
    poller.stop();

    Ok(())
}

/// Wait for every submission to finish, or for `interrupt` to fire first.
///
/// Returns `true` when the set drained.
async fn drain<F: Future>(in_flight: &mut JoinSet<()>, interrupt: F) -> bool {
    tokio::select! {
        () = async { while in_flight.join_next().await.is_some() {} } => true,
        _ = interrupt => false,
    }
}
