//! Generation lifecycle orchestration
//!
//! The [`Generator`] turns one `start` call into an ordered sequence of at
//! most two [`GenerationEvent`]s on a dedicated channel: `Started` followed
//! by exactly one terminal event, or a single immediate `Failed` when the
//! pre-flight check rejects the input. The network call runs on a spawned
//! worker task, so the caller's context never blocks on I/O.

use crate::api::Transport;
use crate::config::ApiConfig;
use crate::request::GenerationRequest;
use crate::style::WritingStyle;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Lifecycle notifications for one generation request, delivered in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// Dispatched before any asynchronous work begins.
    Started,
    /// Terminal: the generated text, already trimmed.
    Completed { text: String },
    /// Terminal: a human-readable failure message.
    Failed { message: String },
}

/// Per-request lifecycle manager.
///
/// Holds the active style and the shared transport/configuration handles.
/// `start` does not queue or reject overlapping requests; preventing
/// re-entrant triggering while a request is in flight is the caller's
/// responsibility, and a caller that allows overlap must tolerate a stale
/// terminal event. Swapping the style mid-flight never affects a dispatched
/// request, which captured its style at start time.
pub struct Generator {
    transport: Arc<dyn Transport>,
    config: Arc<ApiConfig>,
    style: RwLock<WritingStyle>,
}

impl Generator {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<ApiConfig>) -> Self {
        Self {
            transport,
            config,
            style: RwLock::new(WritingStyle::Professional),
        }
    }

    /// Currently active style.
    pub fn style(&self) -> WritingStyle {
        *self.style.read().expect("style lock poisoned")
    }

    /// Swap the active style as a whole unit.
    pub fn set_style(&self, style: WritingStyle) {
        *self.style.write().expect("style lock poisoned") = style;
        info!("Style changed to: {}", style);
    }

    /// Begin generating a rewrite of `input` with the active style.
    ///
    /// Must be called within a tokio runtime. The returned receiver yields
    /// `Started` and then one terminal event; for input that fails the
    /// pre-flight check it yields a single `Failed` with no `Started` and no
    /// asynchronous work.
    pub fn start(&self, input: &str) -> mpsc::Receiver<GenerationEvent> {
        // Capacity 2 holds the full lifecycle even if the caller is slow.
        let (tx, rx) = mpsc::channel(2);
        let style = self.style();

        let request = match GenerationRequest::new(input, style.name()) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected generation request: {}", e);
                let _ = tx.try_send(GenerationEvent::Failed {
                    message: e.to_string(),
                });
                return rx;
            }
        };

        let _ = tx.try_send(GenerationEvent::Started);
        info!(
            "Generation {} started: style={} ({} chars)",
            request.id(),
            request.style_name(),
            request.input().len()
        );

        let transport = Arc::clone(&self.transport);
        let config = Arc::clone(&self.config);
        let worker = tokio::spawn(async move {
            style
                .generate(request.input(), transport.as_ref(), &config)
                .await
        });

        // A separate task awaits the worker so a panic surfaces as a
        // JoinError and becomes a Failed event, never an unhandled fault.
        tokio::spawn(async move {
            let event = match worker.await {
                Ok(Ok(text)) => {
                    debug!("Generation succeeded ({} chars)", text.len());
                    GenerationEvent::Completed { text }
                }
                Ok(Err(e)) => {
                    warn!("Generation failed: {}", e);
                    GenerationEvent::Failed {
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    warn!("Generation worker failed unexpectedly: {}", e);
                    GenerationEvent::Failed {
                        message: format!("Unexpected error: {e}"),
                    }
                }
            };
            let _ = tx.send(event).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenerationError;
    use futures::future::BoxFuture;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake transport returning a canned outcome.
    struct StubTransport {
        calls: AtomicUsize,
        outcome: Result<String, GenerationError>,
    }

    impl StubTransport {
        fn new(outcome: Result<String, GenerationError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
            })
        }
    }

    impl Transport for StubTransport {
        fn send<'a>(
            &'a self,
            _payload: Value,
            _config: &'a ApiConfig,
        ) -> BoxFuture<'a, Result<String, GenerationError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async { outcome })
        }
    }

    /// Transport whose worker panics, to exercise the fault boundary.
    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn send<'a>(
            &'a self,
            _payload: Value,
            _config: &'a ApiConfig,
        ) -> BoxFuture<'a, Result<String, GenerationError>> {
            Box::pin(async { panic!("transport exploded") })
        }
    }

    async fn collect(mut rx: mpsc::Receiver<GenerationEvent>) -> Vec<GenerationEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_started_precedes_completed() {
        let transport = StubTransport::new(Ok("rewritten".to_string()));
        let generator = Generator::new(transport.clone(), Arc::new(ApiConfig::default()));

        let events = collect(generator.start("hello world")).await;

        assert_eq!(
            events,
            vec![
                GenerationEvent::Started,
                GenerationEvent::Completed {
                    text: "rewritten".to_string()
                },
            ]
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_input_fails_without_started() {
        let transport = StubTransport::new(Ok("never".to_string()));
        let generator = Generator::new(transport.clone(), Arc::new(ApiConfig::default()));

        let events = collect(generator.start("   ")).await;

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GenerationEvent::Failed { .. }));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_failed_event() {
        let transport = StubTransport::new(Err(GenerationError::Unauthorized));
        let generator = Generator::new(transport, Arc::new(ApiConfig::default()));

        let events = collect(generator.start("hello")).await;

        assert_eq!(events[0], GenerationEvent::Started);
        match &events[1] {
            GenerationEvent::Failed { message } => {
                assert!(message.to_lowercase().contains("api key"))
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_failed_event() {
        let generator = Generator::new(Arc::new(PanickingTransport), Arc::new(ApiConfig::default()));

        let events = collect(generator.start("hello")).await;

        assert_eq!(events[0], GenerationEvent::Started);
        assert!(matches!(events[1], GenerationEvent::Failed { .. }));
    }

    #[tokio::test]
    async fn test_style_is_captured_at_start_time() {
        let transport = StubTransport::new(Ok("done".to_string()));
        let generator = Generator::new(transport, Arc::new(ApiConfig::default()));
        generator.set_style(WritingStyle::Academic);

        let rx = generator.start("hello");
        // Swapping after start must not affect the in-flight request.
        generator.set_style(WritingStyle::Creative);

        let events = collect(rx).await;
        assert_eq!(events.len(), 2);
        assert_eq!(generator.style(), WritingStyle::Creative);
    }
}
