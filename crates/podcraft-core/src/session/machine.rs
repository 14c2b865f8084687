//! Session state machine.
//!
//! `SessionOrchestrator` drives one podcast conversation: it loads or
//! initializes history, mediates between the message store and the
//! completion provider, and enforces at-most-once persistence per generated
//! turn through the [`PersistenceCoordinator`].
//!
//! All event methods take `&mut self`, so transitions for one session are
//! serialized by construction -- the single-threaded event model the dedup
//! ledger relies on. While a completion stream is in flight, new
//! submissions are rejected (not queued) with [`SessionError::StreamBusy`].

use tracing::{debug, info, warn};
use uuid::Uuid;

use podcraft_types::error::SessionError;
use podcraft_types::host::HostPersona;
use podcraft_types::llm::{CompletionRequest, LlmError, Message, ModelParams};
use podcraft_types::session::SessionState;
use podcraft_types::turn::Turn;

use crate::llm::{CompletionProvider, CompletionStream};
use crate::prompt;
use crate::store::{MessageStore, PodcastStore};
use crate::summarize::Summarizer;

use super::duration::estimate_duration;
use super::flush::PersistenceCoordinator;
use super::loader::load_history;

/// Outcome of [`SessionOrchestrator::finish_conversation`].
///
/// `summary` is `None` when the summarizer failed or there was nothing to
/// summarize -- "summary unavailable", never a session failure.
#[derive(Debug, Clone)]
pub struct FinishReport {
    pub duration_seconds: u32,
    pub summary: Option<String>,
}

/// Orchestrates one conversation session end to end.
///
/// Generic over the four ports so tests can substitute in-memory fakes
/// (clean architecture: podcraft-core never depends on podcraft-infra).
pub struct SessionOrchestrator<M, P, C, S>
where
    M: MessageStore,
    P: PodcastStore,
    C: CompletionProvider,
    S: Summarizer,
{
    message_store: M,
    podcast_store: P,
    provider: C,
    summarizer: S,
    params: ModelParams,

    session_id: Option<Uuid>,
    topic: String,
    description: String,
    host: &'static HostPersona,
    state: SessionState,
    /// Ordered conversation history. Never contains system turns; the
    /// system prompt is reconstructed per request, never taken from storage.
    turns: Vec<Turn>,
    coordinator: PersistenceCoordinator,
    /// The assistant turn currently accumulating stream deltas, if any.
    in_flight: Option<Turn>,
    next_sequence: i64,
}

impl<M, P, C, S> SessionOrchestrator<M, P, C, S>
where
    M: MessageStore,
    P: PodcastStore,
    C: CompletionProvider,
    S: Summarizer,
{
    pub fn new(
        message_store: M,
        podcast_store: P,
        provider: C,
        summarizer: S,
        params: ModelParams,
    ) -> Self {
        Self {
            message_store,
            podcast_store,
            provider,
            summarizer,
            params,
            session_id: None,
            topic: String::new(),
            description: String::new(),
            host: HostPersona::default_host(),
            state: SessionState::Uninitialized,
            turns: Vec::new(),
            coordinator: PersistenceCoordinator::new(),
            in_flight: None,
            next_sequence: 1,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn host(&self) -> &'static HostPersona {
        self.host
    }

    /// The ordered conversation history (no system turns).
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Content of the in-flight assistant turn, while streaming.
    pub fn current_response(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|t| t.content.as_str())
    }

    pub fn is_streaming(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Open (or resume) a session.
    ///
    /// Idempotent: calling again for the same session id while it is
    /// loading or open is a no-op, guarding against duplicate effect
    /// execution under UI re-render.
    ///
    /// Returns `Some(stream)` when the history was empty and a welcome turn
    /// is being generated; the caller must drive the stream through
    /// [`on_stream_token`](Self::on_stream_token) and
    /// [`on_stream_complete`](Self::on_stream_complete).
    pub async fn open_session(
        &mut self,
        session_id: Uuid,
        topic: &str,
        description: &str,
        host_id: &str,
    ) -> Result<Option<CompletionStream>, SessionError> {
        if session_id.is_nil() {
            self.state = SessionState::Failed;
            return Err(SessionError::MissingSession);
        }

        match self.state {
            SessionState::LoadingHistory
            | SessionState::WelcomePending
            | SessionState::Active
            | SessionState::Completing
                if self.session_id == Some(session_id) =>
            {
                debug!(session_id = %session_id, state = %self.state, "open_session is a no-op");
                return Ok(None);
            }
            // A failed session may be retried from scratch.
            SessionState::Uninitialized | SessionState::Failed => {}
            _ => {
                return Err(SessionError::InvalidState {
                    state: self.state,
                    operation: "open_session",
                });
            }
        }

        self.session_id = Some(session_id);
        self.topic = topic.to_string();
        self.description = description.to_string();
        self.host = HostPersona::resolve(host_id);
        self.turns.clear();
        self.coordinator = PersistenceCoordinator::new();
        self.in_flight = None;
        self.state = SessionState::LoadingHistory;

        let history =
            match load_history(&self.message_store, &session_id, &mut self.coordinator).await {
                Ok(turns) => turns,
                Err(e) => {
                    // Without its history the session cannot safely proceed:
                    // it might generate a duplicate welcome.
                    self.state = SessionState::Failed;
                    return Err(SessionError::HistoryLoad(e));
                }
            };

        self.next_sequence = history.last().map(|t| t.sequence + 1).unwrap_or(1);
        self.turns = history;

        if self.turns.is_empty() {
            info!(session_id = %session_id, topic = %self.topic, "Empty session; generating welcome");
            self.state = SessionState::WelcomePending;
            let request = CompletionRequest {
                model: self.params.model.clone(),
                messages: vec![Message::user(prompt::welcome_instruction(
                    self.host,
                    &self.topic,
                ))],
                system: Some(self.system_prompt()),
                max_tokens: self.params.max_tokens,
                temperature: self.params.temperature,
                stream: true,
            };
            self.in_flight = Some(Turn::assistant(session_id, self.next_sequence));
            self.next_sequence += 1;
            Ok(Some(self.provider.stream(request)))
        } else {
            info!(
                session_id = %session_id,
                turn_count = self.turns.len(),
                "Resumed session from history"
            );
            self.state = SessionState::Active;
            Ok(None)
        }
    }

    /// Submit guest input and start the host's streaming reply.
    ///
    /// The user turn is persisted (or at least ledger-attempted) before the
    /// completion request is dispatched, so a resumed session never sees a
    /// host reply without its prompting user turn.
    pub async fn submit_user_input(&mut self, text: &str) -> Result<CompletionStream, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::StreamBusy);
        }
        if !self.state.accepts_input() {
            return Err(SessionError::InvalidState {
                state: self.state,
                operation: "submit_user_input",
            });
        }
        let session_id = self.session_id.ok_or(SessionError::MissingSession)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        // Opportunistic retry of anything a previous trigger failed to flush.
        self.coordinator
            .flush_pending(&self.message_store, &mut self.turns)
            .await;

        let mut turn = Turn::user(session_id, trimmed.to_string(), self.next_sequence);
        self.next_sequence += 1;
        if let Err(e) = self.coordinator.flush(&self.message_store, &mut turn).await {
            warn!(turn_id = %turn.id, error = %e,
                "User turn flush failed; will retry on next trigger");
        }
        self.turns.push(turn);

        let request = self.build_request();
        self.in_flight = Some(Turn::assistant(session_id, self.next_sequence));
        self.next_sequence += 1;
        Ok(self.provider.stream(request))
    }

    /// Append a stream delta to the in-flight assistant turn.
    ///
    /// Purely in-memory; drives UI re-render. Deltas arriving with no turn
    /// in flight (late events after a cancel) are dropped.
    pub fn on_stream_token(&mut self, delta: &str) {
        match &mut self.in_flight {
            Some(turn) => turn.content.push_str(delta),
            None => debug!("Dropping stream delta with no turn in flight"),
        }
    }

    /// Complete the in-flight assistant turn and flush it exactly once.
    ///
    /// Safe to call more than once: a duplicate completion finds no turn in
    /// flight and the ledger has already covered the flushed one. A stream
    /// that completed without yielding any content is discarded like a
    /// cancelled one, reclaiming its sequence number.
    pub async fn on_stream_complete(&mut self) -> Result<(), SessionError> {
        let Some(mut turn) = self.in_flight.take() else {
            debug!("Duplicate stream completion; nothing in flight");
            return Ok(());
        };

        if turn.content.is_empty() {
            debug!(turn_id = %turn.id, "Stream completed without content; discarding empty assistant turn");
            self.next_sequence = turn.sequence;
            if self.state == SessionState::WelcomePending {
                self.state = SessionState::Active;
            }
            return Ok(());
        }

        // Catch up on turns an earlier trigger failed to flush, so the
        // store never holds this reply without its prompting user turn.
        self.coordinator
            .flush_pending(&self.message_store, &mut self.turns)
            .await;

        if let Err(e) = self.coordinator.flush(&self.message_store, &mut turn).await {
            warn!(turn_id = %turn.id, error = %e,
                "Assistant turn flush failed; will retry on next trigger");
        }
        self.turns.push(turn);

        if self.state == SessionState::WelcomePending {
            self.state = SessionState::Active;
            info!("Welcome turn complete; session active");
        }
        Ok(())
    }

    /// Handle a mid-stream provider failure.
    ///
    /// The partial assistant turn is discarded, never persisted. The
    /// session stays usable so the guest can retry their input; a failed
    /// welcome falls through to an active session without one.
    pub fn on_stream_error(&mut self, error: &LlmError) {
        if let Some(turn) = self.in_flight.take() {
            warn!(
                turn_id = %turn.id,
                discarded_chars = turn.content.chars().count(),
                error = %error,
                "Stream failed; partial assistant turn discarded"
            );
            self.next_sequence = turn.sequence;
        }
        if self.state == SessionState::WelcomePending {
            self.state = SessionState::Active;
        }
    }

    /// Cancel the in-flight stream (guest navigated away, Ctrl+C).
    ///
    /// Partial content accumulated so far is discarded, not flushed.
    pub fn cancel_stream(&mut self) {
        if let Some(turn) = self.in_flight.take() {
            info!(
                turn_id = %turn.id,
                discarded_chars = turn.content.chars().count(),
                "Stream cancelled; partial assistant turn discarded"
            );
            self.next_sequence = turn.sequence;
        }
    }

    /// Finish the conversation: flush stragglers, persist the duration
    /// estimate, and request a summary.
    ///
    /// Valid only from `Active`. Duration and summary are both best-effort;
    /// the session always reaches `Completed` once finishing has begun.
    pub async fn finish_conversation(&mut self) -> Result<FinishReport, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::StreamBusy);
        }
        if self.state != SessionState::Active {
            return Err(SessionError::InvalidState {
                state: self.state,
                operation: "finish_conversation",
            });
        }
        let session_id = self.session_id.ok_or(SessionError::MissingSession)?;
        self.state = SessionState::Completing;

        // Defensive flush: anything a failed earlier trigger left behind.
        // The ledger keeps this from double-appending turns that did land.
        self.coordinator
            .flush_pending(&self.message_store, &mut self.turns)
            .await;

        let duration_seconds = estimate_duration(&self.turns);
        if let Err(e) = self
            .podcast_store
            .update_duration(&session_id, duration_seconds)
            .await
        {
            warn!(session_id = %session_id, error = %e, "Failed to persist duration estimate");
        }

        let transcript = prompt::transcript(&self.turns, self.host.name);
        let summary = if transcript.is_empty() {
            None
        } else {
            match self.summarizer.summarize(&transcript).await {
                Ok(text) => {
                    if let Err(e) = self.podcast_store.update_summary(&session_id, &text).await {
                        warn!(session_id = %session_id, error = %e, "Failed to persist summary");
                    }
                    Some(text)
                }
                Err(e) => {
                    warn!(session_id = %session_id, error = %e,
                        "Summarization failed; summary unavailable");
                    None
                }
            }
        };

        self.state = SessionState::Completed;
        info!(session_id = %session_id, duration_seconds, "Session completed");
        Ok(FinishReport {
            duration_seconds,
            summary,
        })
    }

    fn system_prompt(&self) -> String {
        prompt::system_prompt(self.host, &self.topic, &self.description)
    }

    /// Build a streaming request from the full ordered history, with the
    /// system prompt reconstructed and sent out of band.
    fn build_request(&self) -> CompletionRequest {
        let messages = self
            .turns
            .iter()
            .map(|t| Message {
                role: t.role,
                content: t.content.clone(),
            })
            .collect();
        CompletionRequest {
            model: self.params.model.clone(),
            messages,
            system: Some(self.system_prompt()),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            stream: true,
        }
    }
}
