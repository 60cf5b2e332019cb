use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::PatientClassifier;
use crate::heuristics::CueScorer;
use crate::llm::{build_label_prompt, label_tool, validate_label, AnthropicClient, CLASSIFY_SYSTEM_PROMPT};
use crate::models::{ClosedLabel, Intent, Sentiment};

/// How the classifier picks labels; chosen once when the classifier is built
#[derive(Debug)]
pub enum ClassifierBackend {
    /// Closed-set classification through a forced tool call
    Llm(AnthropicClient),
    /// Offline cue-phrase scoring
    Cues {
        sentiment: CueScorer<Sentiment>,
        intent: CueScorer<Intent>,
    },
}

impl ClassifierBackend {
    pub fn cues() -> Self {
        ClassifierBackend::Cues {
            sentiment: CueScorer::default(),
            intent: CueScorer::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassifierBackend::Llm(_) => "llm",
            ClassifierBackend::Cues { .. } => "cues",
        }
    }
}

/// Sentiment and intent classifier for patient text
#[derive(Debug)]
pub struct Classifier {
    backend: ClassifierBackend,
}

impl Classifier {
    pub fn new(backend: ClassifierBackend) -> Self {
        Self { backend }
    }

    /// Use the API when a client is available, cue scoring otherwise
    pub fn from_client(client: Option<AnthropicClient>) -> Self {
        let backend = match client {
            Some(client) => ClassifierBackend::Llm(client),
            None => ClassifierBackend::cues(),
        };
        debug!("Classifier backend: {}", backend.name());
        Self::new(backend)
    }

    pub fn backend(&self) -> &ClassifierBackend {
        &self.backend
    }

    async fn classify_llm<L: ClosedLabel>(
        client: &AnthropicClient,
        task: &str,
        text: &str,
    ) -> Result<L> {
        let labels = L::labels();
        let prompt = build_label_prompt(task, text, &labels);
        let input = client
            .send_with_tool(CLASSIFY_SYSTEM_PROMPT, &prompt, label_tool(&labels))
            .await?;
        validate_label(&input)
    }
}

#[async_trait]
impl PatientClassifier for Classifier {
    async fn classify_sentiment(&self, patient_text: &str) -> Result<Sentiment> {
        if patient_text.trim().is_empty() {
            return Ok(Sentiment::FALLBACK);
        }
        match &self.backend {
            ClassifierBackend::Llm(client) => {
                Self::classify_llm(client, "sentiment", patient_text).await
            }
            ClassifierBackend::Cues { sentiment, .. } => Ok(sentiment.classify(patient_text)),
        }
    }

    async fn classify_intent(&self, patient_text: &str) -> Result<Intent> {
        if patient_text.trim().is_empty() {
            return Ok(Intent::FALLBACK);
        }
        match &self.backend {
            ClassifierBackend::Llm(client) => {
                Self::classify_llm(client, "intent", patient_text).await
            }
            ClassifierBackend::Cues { intent, .. } => Ok(intent.classify(patient_text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::AnthropicConfig;

    #[test]
    fn test_backend_selected_at_construction() {
        let offline = Classifier::from_client(None);
        assert_eq!(offline.backend().name(), "cues");

        let client = AnthropicClient::new(AnthropicConfig::new("key".into(), "model".into()));
        let online = Classifier::from_client(Some(client));
        assert_eq!(online.backend().name(), "llm");
    }

    #[tokio::test]
    async fn test_empty_text_defaults_without_backend_call() {
        // The client would fail if called: the key is fake and no server is reachable.
        let client = AnthropicClient::new(AnthropicConfig::new("key".into(), "model".into()));
        let classifier = Classifier::from_client(Some(client));

        assert_eq!(classifier.classify_sentiment("").await.unwrap(), Sentiment::Neutral);
        assert_eq!(
            classifier.classify_intent("  ").await.unwrap(),
            Intent::ReportingSymptoms
        );
    }

    #[tokio::test]
    async fn test_llm_request_failure_is_an_error() {
        let config = AnthropicConfig::new("key".into(), "model".into())
            .with_base_url("http://127.0.0.1:9");
        let classifier = Classifier::from_client(Some(AnthropicClient::new(config)));

        assert!(classifier.classify_sentiment("I'm worried").await.is_err());
        assert!(classifier.classify_intent("I'm worried").await.is_err());
    }

    #[tokio::test]
    async fn test_cue_backend() {
        let classifier = Classifier::new(ClassifierBackend::cues());
        let text = "I'm worried. Will I need more treatment in the future?";

        assert_eq!(classifier.classify_sentiment(text).await.unwrap(), Sentiment::Anxious);
        assert_eq!(
            classifier.classify_intent(text).await.unwrap(),
            Intent::SeekingReassurance
        );
    }
}
