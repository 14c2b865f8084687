//! LLM-backed episode summarizer.
//!
//! Wraps any [`CompletionProvider`] in the [`Summarizer`] port. Summaries
//! use a non-streaming request at temperature 0 so repeated runs over the
//! same transcript stay stable.

use podcraft_core::llm::CompletionProvider;
use podcraft_core::summarize::Summarizer;
use podcraft_types::llm::{CompletionRequest, LlmError, Message, ModelParams};

const SUMMARY_SYSTEM_PROMPT: &str = "You summarize podcast episode transcripts. \
Write a single short paragraph (2-3 sentences) capturing the main topics \
discussed and any conclusions reached. Write in the third person, present \
tense. Do not mention that this is a transcript or a summary.";

/// Summarizer backed by a completion provider.
pub struct LlmSummarizer<C: CompletionProvider> {
    provider: C,
    params: ModelParams,
}

impl<C: CompletionProvider> LlmSummarizer<C> {
    pub fn new(provider: C, params: ModelParams) -> Self {
        Self { provider, params }
    }
}

impl<C: CompletionProvider> Summarizer for LlmSummarizer<C> {
    async fn summarize(&self, transcript: &str) -> Result<String, LlmError> {
        if transcript.trim().is_empty() {
            return Err(LlmError::InvalidRequest(
                "cannot summarize an empty transcript".to_string(),
            ));
        }

        let request = CompletionRequest {
            model: self.params.model.clone(),
            messages: vec![Message::user(transcript)],
            system: Some(SUMMARY_SYSTEM_PROMPT.to_string()),
            max_tokens: self.params.max_tokens,
            temperature: Some(0.0),
            stream: false,
        };

        let response = self.provider.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }
}
