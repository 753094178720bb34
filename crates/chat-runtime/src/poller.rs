//! Background health polling (native hosts)
//!
//! The poller is an owned task: it probes immediately, then once per period,
//! until [`HealthPoller::stop`] is called or the handle is dropped. There is no
//! backoff and no retry cap; every probe overwrites the indicator.
//!
//! Probes never overlap here: each tick awaits the probe, and a tick missed
//! while a slow probe was running is delayed rather than fired in a burst.
//! The browser's interval timer can overlap probes instead, and there the last
//! one to settle wins.

use std::sync::Arc;
use std::time::Duration;

use chat_core::{ChatBackend, ChatClient, ChatView};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug)]
pub struct HealthPoller {
    handle: JoinHandle<()>,
    period: Duration,
}

impl HealthPoller {
    /// Start polling `client`'s health endpoint, reporting to `view`
    pub fn spawn<B, V>(client: Arc<ChatClient<B>>, view: Arc<V>, period: Duration) -> Self
    where
        B: ChatBackend + Send + Sync + 'static,
        V: ChatView + Send + Sync + 'static,
    {
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                let status = client.poll_health(view.as_ref()).await;
                tracing::debug!(%status, "Health probe settled");
            }
        });

        Self { handle, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the polling task
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chat_core::{
        AskRequest, BodyStream, ClientError, ConnectivityStatus, DeliveryMode, MemoryView, Result,
    };

    use super::*;

    #[derive(Default)]
    struct ProbeBackend {
        outcomes: Mutex<VecDeque<bool>>,
        probes: AtomicUsize,
    }

    impl ProbeBackend {
        fn scripted(outcomes: &[bool]) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
                probes: AtomicUsize::new(0),
            }
        }

        fn probes(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatBackend for ProbeBackend {
        async fn ask(&self, _request: &AskRequest) -> Result<BodyStream> {
            Err(ClientError::Other("not used".into()))
        }

        async fn health(&self) -> Result<()> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            let healthy = self.outcomes.lock().unwrap().pop_front().unwrap_or(false);
            if healthy {
                Ok(())
            } else {
                Err(ClientError::Status(500))
            }
        }
    }

    fn client(outcomes: &[bool]) -> Arc<ChatClient<ProbeBackend>> {
        Arc::new(ChatClient::new(
            ProbeBackend::scripted(outcomes),
            DeliveryMode::Streaming,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_probe_without_waiting() {
        let client = client(&[true]);
        let view = Arc::new(MemoryView::new());
        let poller = HealthPoller::spawn(client.clone(), view.clone(), Duration::from_secs(5));
        assert_eq!(poller.period(), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(client.backend().probes(), 1);
        assert_eq!(view.status(), ConnectivityStatus::Online);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_follows_each_probe() {
        let client = client(&[true, false, true]);
        let view = Arc::new(MemoryView::new());
        let _poller = HealthPoller::spawn(client.clone(), view.clone(), Duration::from_millis(5000));

        let mut seen = Vec::new();
        tokio::time::sleep(Duration::from_millis(10)).await;
        seen.push(view.status());
        for _ in 0..2 {
            tokio::time::sleep(Duration::from_millis(5000)).await;
            seen.push(view.status());
        }

        assert_eq!(client.backend().probes(), 3);
        assert_eq!(
            seen,
            vec![
                ConnectivityStatus::Online,
                ConnectivityStatus::Offline,
                ConnectivityStatus::Online,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_polling() {
        let client = client(&[]);
        let view = Arc::new(MemoryView::new());
        let poller = HealthPoller::spawn(client.clone(), view.clone(), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(poller.is_running());
        poller.stop();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(client.backend().probes(), 1);
        assert_eq!(view.status(), ConnectivityStatus::Offline);
    }
}
