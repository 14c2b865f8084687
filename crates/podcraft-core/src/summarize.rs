//! Summarizer port.

use podcraft_types::llm::LlmError;

/// Trait for conversation summarization backends.
///
/// The result is opaque to the orchestrator beyond being storable on the
/// podcast record. Summarization is always best-effort: callers must treat
/// a failure as "summary unavailable", never as a session failure.
pub trait Summarizer: Send + Sync {
    /// Summarize a conversation transcript.
    fn summarize(
        &self,
        transcript: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
