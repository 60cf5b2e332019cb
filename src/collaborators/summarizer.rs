use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::Summarizer;
use crate::heuristics::{extractive_summary, Lexicon};
use crate::llm::{build_summary_prompt, validate_summary, AnthropicClient, SUMMARY_SYSTEM_PROMPT};

/// Cut `text` to at most `max_chars` characters, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Abstractive summarizer calling the Anthropic API
#[derive(Debug)]
pub struct LlmSummarizer {
    client: AnthropicClient,
    /// Input is truncated to this many characters before the request
    char_budget: usize,
}

impl LlmSummarizer {
    pub fn new(client: AnthropicClient, char_budget: usize) -> Self {
        Self {
            client,
            char_budget,
        }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let input = truncate_chars(text, self.char_budget);
        if input.len() < text.len() {
            debug!(
                "Summary input truncated to {} of {} chars",
                self.char_budget,
                text.chars().count()
            );
        }

        let prompt = build_summary_prompt(input);
        let summary = self
            .client
            .send_message(SUMMARY_SYSTEM_PROMPT, &prompt)
            .await?;
        validate_summary(&summary)
    }
}

/// Offline summarizer selecting the most clinical sentences
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    lexicon: Lexicon,
    max_sentences: usize,
}

impl ExtractiveSummarizer {
    pub fn new(lexicon: Lexicon, max_sentences: usize) -> Self {
        Self {
            lexicon,
            max_sentences,
        }
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let summary = extractive_summary(&self.lexicon, text, self.max_sentences);
        validate_summary(&summary)
    }
}
