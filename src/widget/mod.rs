//! Chat widget lifecycle
//!
//! `ChatWidget` is the explicit instance object a host owns. `init` builds the
//! bubble and panel state, `destroy` tears it down again, and `submit` starts
//! one exchange with the backend. Exchanges run as tokio tasks; their results
//! come back over a channel and are committed to the log by `poll_replies`
//! (once per frame) or `next_reply` / `settle` (headless hosts).

pub mod sequencer;

use crate::config::WidgetConfig;
use crate::error::TransportError;
use crate::session::SessionId;
use crate::state::{Composer, Conversation};
use crate::transport::{ChatReply, ChatRequest, ChatTransport};
use sequencer::{ReplySequencer, Seq};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Bot message shown when the backend cannot be reached or answers with an error
pub const NETWORK_ERROR_MESSAGE: &str =
    "Sorry, the network or backend is unavailable. Please try again later.";

/// Bot message shown when the backend answers without a reply text
pub const UNEXPECTED_RESPONSE_MESSAGE: &str =
    "Sorry, I received an unexpected response from the server.";

/// Callback run from the exchange task after a result was queued
pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

/// Result of handing text to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Entry appended and request issued
    Sent(Seq),
    /// Blank text; nothing happened
    Ignored,
    /// Widget is not initialized
    Inactive,
}

/// Result of one exchange, tagged for ordering
struct Delivery {
    /// Widget generation that issued the exchange
    generation: u64,
    seq: Seq,
    outcome: Result<ChatReply, TransportError>,
}

/// Queues an exchange result when the task ends
///
/// A task that panics or is aborted still resolves its sequence number, as an
/// `Interrupted` failure, so later replies are not held back behind it.
struct DeliverOnDrop {
    tx: UnboundedSender<Delivery>,
    wake: Option<WakeFn>,
    generation: u64,
    seq: Seq,
    outcome: Option<Result<ChatReply, TransportError>>,
}

impl Drop for DeliverOnDrop {
    fn drop(&mut self) {
        let outcome = self
            .outcome
            .take()
            .unwrap_or_else(|| Err(TransportError::Interrupted));
        let delivery = Delivery {
            generation: self.generation,
            seq: self.seq,
            outcome,
        };
        if self.tx.send(delivery).is_ok() {
            if let Some(wake) = &self.wake {
                wake();
            }
        }
    }
}

/// Everything that exists between `init` and `destroy`
struct ActiveWidget {
    config: WidgetConfig,
    session_id: SessionId,
    conversation: Conversation,
    composer: Composer,
    sequencer: ReplySequencer<String>,
    in_flight: HashMap<Seq, JoinHandle<()>>,
}

/// Embeddable chat widget: one bubble, one panel, one session
pub struct ChatWidget {
    transport: Arc<dyn ChatTransport>,
    runtime: Handle,
    wake: Option<WakeFn>,
    deliveries_tx: UnboundedSender<Delivery>,
    deliveries_rx: UnboundedReceiver<Delivery>,
    /// Bumped on every destroy so late results from a torn-down instance are dropped
    generation: u64,
    active: Option<ActiveWidget>,
}

impl ChatWidget {
    /// Create an uninitialized widget
    ///
    /// Exchanges are spawned on `runtime`.
    pub fn new(transport: Arc<dyn ChatTransport>, runtime: Handle) -> Self {
        let (deliveries_tx, deliveries_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            runtime,
            wake: None,
            deliveries_tx,
            deliveries_rx,
            generation: 0,
            active: None,
        }
    }

    /// Register a callback run whenever a result is ready to be polled
    /// (typically a repaint request)
    pub fn with_wake(mut self, wake: WakeFn) -> Self {
        self.wake = Some(wake);
        self
    }

    /// Build the bubble and panel
    ///
    /// Returns false, changing nothing, if the widget is already initialized.
    pub fn init(&mut self, config: WidgetConfig) -> bool {
        if let Some(active) = &self.active {
            debug!(
                session_id = %active.session_id,
                "Chat widget already initialized, ignoring init"
            );
            return false;
        }

        let session_id = SessionId::resolve(config.session_id.as_deref());
        let mut conversation = Conversation::new();
        if let Some(welcome) = config
            .welcome_message
            .as_deref()
            .filter(|w| !w.trim().is_empty())
        {
            conversation.push_bot(welcome);
        }

        info!(
            session_id = %session_id,
            supplied_session = config.session_id.is_some(),
            "Chat widget initialized"
        );

        self.active = Some(ActiveWidget {
            config,
            session_id,
            conversation,
            composer: Composer::new(),
            sequencer: ReplySequencer::new(),
            in_flight: HashMap::new(),
        });
        true
    }

    /// Remove the bubble and panel and forget config and session
    ///
    /// Outstanding exchanges are aborted. Safe to call when never initialized.
    pub fn destroy(&mut self) {
        self.generation += 1;
        let Some(active) = self.active.take() else {
            return;
        };

        let aborted = active.in_flight.len();
        for (_, handle) in active.in_flight {
            handle.abort();
        }
        // Drop anything already queued by the old instance
        while self.deliveries_rx.try_recv().is_ok() {}

        info!(
            session_id = %active.session_id,
            aborted_exchanges = aborted,
            "Chat widget destroyed"
        );
    }

    /// Whether `init` has run without a matching `destroy`
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Show the panel
    pub fn open(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.conversation.set_open(true) {
                debug!(session_id = %active.session_id, "Chat panel opened");
            }
        }
    }

    /// Hide the panel
    pub fn close(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.conversation.set_open(false) {
                debug!(session_id = %active.session_id, "Chat panel closed");
            }
        }
    }

    /// Flip panel visibility (bubble click)
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Whether the panel is visible
    pub fn is_open(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.conversation.is_open())
    }

    /// Current session identifier, `None` when uninitialized
    pub fn session_id(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.session_id.as_str())
    }

    /// Configuration passed to `init`
    pub fn config(&self) -> Option<&WidgetConfig> {
        self.active.as_ref().map(|active| &active.config)
    }

    /// View model of the panel
    pub fn conversation(&self) -> Option<&Conversation> {
        self.active.as_ref().map(|active| &active.conversation)
    }

    /// Mutable view model, for the renderer's scroll bookkeeping
    pub fn conversation_mut(&mut self) -> Option<&mut Conversation> {
        self.active.as_mut().map(|active| &mut active.conversation)
    }

    /// Input composer of the panel
    pub fn composer_mut(&mut self) -> Option<&mut Composer> {
        self.active.as_mut().map(|active| &mut active.composer)
    }

    /// Number of exchanges whose reply is not yet in the log
    pub fn pending_exchanges(&self) -> usize {
        self.active
            .as_ref()
            .map_or(0, |active| active.sequencer.outstanding())
    }

    /// Send whatever the composer holds
    pub fn submit_composer(&mut self) -> SubmitOutcome {
        let Some(text) = self
            .active
            .as_mut()
            .and_then(|active| active.composer.take_submission())
        else {
            return if self.active.is_some() {
                SubmitOutcome::Ignored
            } else {
                SubmitOutcome::Inactive
            };
        };
        self.submit(&text)
    }

    /// Append a user entry and start its exchange
    ///
    /// Blank text is ignored. The call never waits for the backend.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(active) = self.active.as_mut() else {
            return SubmitOutcome::Inactive;
        };
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        active.conversation.push_user(text);
        let seq = active.sequencer.issue();
        active.conversation.set_typing(true);

        let request = ChatRequest::new(active.session_id.as_str(), text);
        let transport = Arc::clone(&self.transport);
        let tx = self.deliveries_tx.clone();
        let wake = self.wake.clone();
        let generation = self.generation;

        debug!(
            session_id = %active.session_id,
            seq,
            text_len = text.len(),
            "Starting chat exchange"
        );

        let handle = self.runtime.spawn(async move {
            let mut delivery = DeliverOnDrop {
                tx,
                wake,
                generation,
                seq,
                outcome: None,
            };
            delivery.outcome = Some(transport.send(request).await);
        });
        active.in_flight.insert(seq, handle);

        SubmitOutcome::Sent(seq)
    }

    /// Commit every result that has already arrived
    ///
    /// Returns the number of bot entries appended.
    pub fn poll_replies(&mut self) -> usize {
        let mut committed = 0;
        while let Ok(delivery) = self.deliveries_rx.try_recv() {
            committed += self.apply(delivery);
        }
        committed
    }

    /// Wait for the next result and commit it
    ///
    /// Returns `None` immediately when nothing is outstanding, otherwise the
    /// number of bot entries appended (zero while an earlier reply is still
    /// missing).
    pub async fn next_reply(&mut self) -> Option<usize> {
        if self.pending_exchanges() == 0 {
            return None;
        }
        let delivery = self.deliveries_rx.recv().await?;
        Some(self.apply(delivery))
    }

    /// Wait until every outstanding exchange has been committed
    pub async fn settle(&mut self) {
        while self.next_reply().await.is_some() {}
    }

    fn apply(&mut self, delivery: Delivery) -> usize {
        if delivery.generation != self.generation {
            debug!(
                seq = delivery.seq,
                "Discarding reply from a destroyed widget instance"
            );
            return 0;
        }
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        active.in_flight.remove(&delivery.seq);

        let text = match delivery.outcome {
            Ok(reply) => match reply.text {
                Some(text) => text,
                None => {
                    warn!(
                        session_id = %active.session_id,
                        seq = delivery.seq,
                        "Backend reply has no text field"
                    );
                    UNEXPECTED_RESPONSE_MESSAGE.to_string()
                }
            },
            Err(e) => {
                error!(
                    session_id = %active.session_id,
                    seq = delivery.seq,
                    error = %e,
                    "Chat exchange failed"
                );
                NETWORK_ERROR_MESSAGE.to_string()
            }
        };

        let released = active.sequencer.resolve(delivery.seq, text);
        let committed = released.len();
        for text in released {
            active.conversation.push_bot(text);
        }
        active
            .conversation
            .set_typing(!active.sequencer.is_idle());
        committed
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        if let Some(active) = self.active.as_mut() {
            for (_, handle) in active.in_flight.drain() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportConfig;
    use crate::state::Author;
    use crate::transport::HttpTransport;
    use async_trait::async_trait;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    type Gate = oneshot::Sender<Result<ChatReply, TransportError>>;

    /// Transport whose replies are released by the test, keyed by message text
    #[derive(Default)]
    struct GatedTransport {
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<ChatReply, TransportError>>>>,
        calls: AtomicUsize,
    }

    impl GatedTransport {
        fn gate(&self, text: &str) -> Gate {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(text.to_string(), rx);
            tx
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatTransport for GatedTransport {
        async fn send(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rx = self.gates.lock().unwrap().remove(&request.text);
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| {
                    Err(TransportError::Status {
                        status: 599,
                        body: "gate dropped".to_string(),
                    })
                }),
                None => Ok(ChatReply::text(format!("echo: {}", request.text))),
            }
        }
    }

    fn widget_with(transport: Arc<dyn ChatTransport>) -> ChatWidget {
        ChatWidget::new(transport, Handle::current())
    }

    fn texts(widget: &ChatWidget) -> Vec<(Author, String)> {
        widget
            .conversation()
            .map(|c| {
                c.messages()
                    .iter()
                    .map(|m| (m.author, m.text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));
        assert!(widget.init(WidgetConfig::new().with_welcome_message("Hi!")));
        let first_session = widget.session_id().unwrap().to_string();

        assert!(!widget.init(
            WidgetConfig::new()
                .with_session_id("other")
                .with_welcome_message("Ignored")
        ));
        assert_eq!(widget.session_id(), Some(first_session.as_str()));
        assert_eq!(
            widget.config().unwrap().welcome_message.as_deref(),
            Some("Hi!")
        );
        assert_eq!(widget.conversation().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_init_generates_or_uses_session_id() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));
        assert!(widget.session_id().is_none());

        widget.init(WidgetConfig::new());
        assert!(SessionId::has_generated_shape(widget.session_id().unwrap()));

        widget.destroy();
        widget.init(WidgetConfig::new().with_session_id("host-provided"));
        assert_eq!(widget.session_id(), Some("host-provided"));
    }

    #[tokio::test]
    async fn test_welcome_message_is_first_bot_entry() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));
        widget.init(WidgetConfig::new().with_welcome_message("Welcome aboard"));
        assert_eq!(
            texts(&widget),
            vec![(Author::Bot, "Welcome aboard".to_string())]
        );
        assert!(!widget.is_open());
    }

    #[tokio::test]
    async fn test_open_close_are_idempotent() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));

        // No panel yet: no effect
        widget.open();
        assert!(!widget.is_open());

        widget.init(WidgetConfig::new());
        widget.open();
        widget.open();
        assert!(widget.is_open());
        widget.close();
        widget.close();
        assert!(!widget.is_open());

        widget.toggle();
        assert!(widget.is_open());
        widget.toggle();
        assert!(!widget.is_open());
    }

    #[tokio::test]
    async fn test_blank_submission_sends_nothing() {
        let transport = Arc::new(GatedTransport::default());
        let mut widget = widget_with(transport.clone());
        widget.init(WidgetConfig::new());

        assert_eq!(widget.submit("   \n\t"), SubmitOutcome::Ignored);
        assert_eq!(widget.submit_composer(), SubmitOutcome::Ignored);
        tokio::task::yield_now().await;

        assert!(widget.conversation().unwrap().is_empty());
        assert!(!widget.conversation().unwrap().is_typing());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_before_init_is_inactive() {
        let transport = Arc::new(GatedTransport::default());
        let mut widget = widget_with(transport.clone());
        assert_eq!(widget.submit("Hello"), SubmitOutcome::Inactive);
        assert_eq!(widget.submit_composer(), SubmitOutcome::Inactive);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_hello_bonjour_against_mock_backend() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/message")
            .match_body(Matcher::PartialJson(json!({"text": "Hello"})))
            .with_status(200)
            .with_body(r#"{"text": "Bonjour"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(TransportConfig {
            base_url: server.url(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();
        let mut widget = widget_with(Arc::new(transport));
        widget.init(WidgetConfig::new().with_session_id("s-hello"));
        widget.open();

        assert!(matches!(widget.submit("Hello"), SubmitOutcome::Sent(_)));
        assert!(widget.conversation().unwrap().is_typing());

        widget.settle().await;

        mock.assert_async().await;
        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "Hello".to_string()),
                (Author::Bot, "Bonjour".to_string()),
            ]
        );
        assert!(!widget.conversation().unwrap().is_typing());
    }

    #[tokio::test]
    async fn test_typing_visible_until_resolution() {
        let transport = Arc::new(GatedTransport::default());
        let gate = transport.gate("Hello");
        let mut widget = widget_with(transport.clone());
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        tokio::task::yield_now().await;
        assert_eq!(widget.poll_replies(), 0);
        assert!(widget.conversation().unwrap().is_typing());

        gate.send(Ok(ChatReply::text("Bonjour"))).unwrap();
        assert_eq!(widget.next_reply().await, Some(1));
        assert!(!widget.conversation().unwrap().is_typing());
        assert_eq!(widget.pending_exchanges(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_shows_fallback() {
        let transport = Arc::new(GatedTransport::default());
        let gate = transport.gate("Hello");
        let mut widget = widget_with(transport);
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        gate.send(Err(TransportError::Status {
            status: 503,
            body: "down".to_string(),
        }))
        .unwrap();
        widget.settle().await;

        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "Hello".to_string()),
                (Author::Bot, NETWORK_ERROR_MESSAGE.to_string()),
            ]
        );
        assert!(!widget.conversation().unwrap().is_typing());

        // Still usable after a failure
        widget.submit("Retry");
        widget.settle().await;
        assert_eq!(
            widget.conversation().unwrap().last().unwrap().text,
            "echo: Retry"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_shows_fallback() {
        let transport = HttpTransport::new(TransportConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();
        let mut widget = widget_with(Arc::new(transport));
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        widget.settle().await;

        assert_eq!(
            widget.conversation().unwrap().last().unwrap().text,
            NETWORK_ERROR_MESSAGE
        );
        assert!(!widget.conversation().unwrap().is_typing());
    }

    #[tokio::test]
    async fn test_reply_without_text_shows_unexpected() {
        let transport = Arc::new(GatedTransport::default());
        let gate = transport.gate("Hello");
        let mut widget = widget_with(transport);
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        gate.send(Ok(ChatReply::default())).unwrap();
        widget.settle().await;

        assert_eq!(
            widget.conversation().unwrap().last().unwrap().text,
            UNEXPECTED_RESPONSE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body_shows_unexpected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/message")
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let transport = HttpTransport::new(TransportConfig {
            base_url: server.url(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();
        let mut widget = widget_with(Arc::new(transport));
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        widget.settle().await;

        mock.assert_async().await;
        assert_eq!(
            widget.conversation().unwrap().last().unwrap().text,
            UNEXPECTED_RESPONSE_MESSAGE
        );
        assert!(!widget.conversation().unwrap().is_typing());
    }

    #[tokio::test]
    async fn test_out_of_order_replies_commit_in_submission_order() {
        let transport = Arc::new(GatedTransport::default());
        let first = transport.gate("one");
        let second = transport.gate("two");
        let mut widget = widget_with(transport);
        widget.init(WidgetConfig::new());

        widget.submit("one");
        widget.submit("two");
        assert_eq!(widget.pending_exchanges(), 2);

        second.send(Ok(ChatReply::text("reply two"))).unwrap();
        assert_eq!(widget.next_reply().await, Some(0));
        assert!(widget.conversation().unwrap().is_typing());

        first.send(Ok(ChatReply::text("reply one"))).unwrap();
        assert_eq!(widget.next_reply().await, Some(2));

        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "one".to_string()),
                (Author::User, "two".to_string()),
                (Author::Bot, "reply one".to_string()),
                (Author::Bot, "reply two".to_string()),
            ]
        );
        assert!(!widget.conversation().unwrap().is_typing());
    }

    /// Transport that panics on one message and echoes the rest
    struct PanickingTransport;

    #[async_trait]
    impl ChatTransport for PanickingTransport {
        async fn send(&self, request: ChatRequest) -> Result<ChatReply, TransportError> {
            if request.text == "boom" {
                panic!("transport blew up");
            }
            Ok(ChatReply::text(format!("echo: {}", request.text)))
        }
    }

    #[tokio::test]
    async fn test_panicking_exchange_does_not_block_later_replies() {
        let mut widget = widget_with(Arc::new(PanickingTransport));
        widget.init(WidgetConfig::new());

        widget.submit("boom");
        widget.submit("Hello");
        tokio::time::timeout(Duration::from_secs(5), widget.settle())
            .await
            .unwrap();

        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "boom".to_string()),
                (Author::User, "Hello".to_string()),
                (Author::Bot, NETWORK_ERROR_MESSAGE.to_string()),
                (Author::Bot, "echo: Hello".to_string()),
            ]
        );
        assert!(!widget.conversation().unwrap().is_typing());
        assert_eq!(widget.pending_exchanges(), 0);
    }

    #[tokio::test]
    async fn test_destroy_resets_and_allows_fresh_init() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));
        widget.destroy(); // never initialized

        widget.init(WidgetConfig::new().with_welcome_message("Hi"));
        widget.open();
        let first = widget.session_id().unwrap().to_string();

        widget.destroy();
        assert!(!widget.is_initialized());
        assert!(widget.session_id().is_none());
        assert!(widget.config().is_none());
        assert!(widget.conversation().is_none());
        assert!(!widget.is_open());

        assert!(widget.init(WidgetConfig::new()));
        let second = widget.session_id().unwrap().to_string();
        assert_ne!(first, second);
        assert!(widget.conversation().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_cancels_outstanding_exchanges() {
        let transport = Arc::new(GatedTransport::default());
        let gate = transport.gate("Hello");
        let mut widget = widget_with(transport);
        widget.init(WidgetConfig::new());

        widget.submit("Hello");
        tokio::task::yield_now().await;
        widget.destroy();
        widget.init(WidgetConfig::new());

        // Whether or not the aborted task still sees the gate, nothing may land
        let _ = gate.send(Ok(ChatReply::text("late reply")));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(widget.poll_replies(), 0);
        assert!(widget.conversation().unwrap().is_empty());
        assert!(!widget.conversation().unwrap().is_typing());
        assert_eq!(widget.next_reply().await, None);
    }

    #[tokio::test]
    async fn test_composer_submission_flows_through() {
        let mut widget = widget_with(Arc::new(GatedTransport::default()));
        widget.init(WidgetConfig::new());

        widget.composer_mut().unwrap().buffer_mut().push_str("  Paris  ");
        assert!(matches!(widget.submit_composer(), SubmitOutcome::Sent(0)));
        assert_eq!(widget.composer_mut().unwrap().text(), "");

        widget.settle().await;
        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "Paris".to_string()),
                (Author::Bot, "echo: Paris".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_wake_runs_after_delivery() {
        let woken = Arc::new(AtomicUsize::new(0));
        let counter = woken.clone();
        let mut widget = widget_with(Arc::new(GatedTransport::default())).with_wake(Arc::new(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));
        widget.init(WidgetConfig::new());

        widget.submit("ping");
        widget.settle().await;
        assert_eq!(woken.load(Ordering::SeqCst), 1);
    }
}
