//! CompletionProvider trait definition.
//!
//! The abstraction over the streaming language-model backend. Uses RPITIT
//! for `complete` and `Pin<Box<dyn Stream>>` for `stream` (streams need a
//! concrete type so the orchestrator can hand them to its caller).

use std::pin::Pin;

use futures_util::Stream;

use podcraft_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

/// A pinned, boxed stream of completion events.
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for streaming completion backends (DeepSeek, OpenAI, etc.).
///
/// The provider is stateless across calls: every invocation receives the
/// full reconstructed conversation history in `request.messages`.
///
/// Implementations live in podcraft-infra (e.g. `DeepSeekProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g. "deepseek").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Dropping the returned stream cancels the request; nothing consumed
    /// up to that point has been persisted by the orchestrator.
    fn stream(&self, request: CompletionRequest) -> CompletionStream;
}
