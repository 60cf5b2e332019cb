use anyhow::Result;
use async_trait::async_trait;

use crate::models::{EntityBag, Intent, Sentiment, SoapNote};

/// Maps text to categorized clinical entities
///
/// Output must be deterministic for identical input and must not repeat a
/// string within a category.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<EntityBag>;
}

/// Maps text to a shorter clinical narrative; success means a non-empty string
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Closed-set classification of the patient's side of the conversation
///
/// Empty input must yield the label set's fallback rather than an error.
#[async_trait]
pub trait PatientClassifier: Send + Sync {
    async fn classify_sentiment(&self, patient_text: &str) -> Result<Sentiment>;
    async fn classify_intent(&self, patient_text: &str) -> Result<Intent>;
}

/// Produces a SOAP note from the transcript
///
/// `entities` and `summary` are hints and may be empty. Failures are
/// reported as [`SoapNote::Degraded`] instead of an error.
#[async_trait]
pub trait SoapGenerator: Send + Sync {
    async fn generate(&self, full_text: &str, entities: &EntityBag, summary: &str) -> SoapNote;
}
