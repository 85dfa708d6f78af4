use std::sync::Arc;

use common::{cancel::CancelToken, models::Message, store::Store};
use gateway::{AskResponse, CommandGateway};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub messages: Vec<Message>,
    /// True while at least one ask is awaiting the gateway.
    pub pending: bool,
    pub input: String,
    in_flight: usize,
}

impl SessionState {
    fn settle_ask(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.pending = self.in_flight > 0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent or recorded.
    Ignored,
    Answered(AskResponse),
    /// The gateway call failed. The same text is already in the log.
    Failed(String),
    /// The session was torn down before the reply arrived.
    Abandoned,
}

/// Owns the conversation log and the ask round-trip.
///
/// The log is append-only: each submitted message is recorded before the
/// request leaves, and exactly one assistant reply (answer or `Error: ...`)
/// follows it. Failures are reported only through that reply.
pub struct SessionManager {
    gateway: Arc<dyn CommandGateway>,
    store: Store<SessionState>,
    cancel: CancelToken,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn CommandGateway>, cancel: CancelToken) -> Self {
        Self {
            gateway,
            store: Store::default(),
            cancel,
        }
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.read(|s| s.messages.clone())
    }

    pub fn is_pending(&self) -> bool {
        self.store.read(|s| s.pending)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn listen(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) {
        self.store.listen(listener);
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|s| s.input = text);
    }

    pub async fn submit_input(&self) -> SubmitOutcome {
        let text = self.store.read(|s| s.input.clone());
        self.submit(&text).await
    }

    /// Nothing here rejects a second call while one is pending; front ends
    /// are expected to gate on [`SessionState::pending`].
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return SubmitOutcome::Ignored;
        }

        self.store.update(|s| {
            s.messages.push(Message::user(text));
            s.in_flight += 1;
            s.pending = true;
        });

        let result = self.gateway.ask(text).await;

        if self.cancel.is_cancelled() {
            debug!("Session torn down, dropping reply");
            self.store.update(SessionState::settle_ask);
            return SubmitOutcome::Abandoned;
        }

        let (reply, outcome) = match result {
            Ok(resp) => {
                info!("Gateway answered (intent: {:?})", resp.intent);
                (Message::assistant(resp.answer.clone()), SubmitOutcome::Answered(resp))
            }
            Err(e) => {
                let description = e.description();
                warn!("Ask failed: {}", description);
                (
                    Message::assistant(format!("Error: {}", description)),
                    SubmitOutcome::Failed(description),
                )
            }
        };

        self.store.update(|s| {
            s.messages.push(reply);
            s.settle_ask();
            // Cleared on failure too, the draft is not restored.
            s.input.clear();
        });

        outcome
    }
}
