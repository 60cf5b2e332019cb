use async_trait::async_trait;
use tracing::{info, warn};

use super::SoapGenerator;
use crate::llm::{build_soap_prompt, soap_tool, validate_soap, AnthropicClient, SOAP_SYSTEM_PROMPT};
use crate::models::{EntityBag, SoapNote};

pub const MISSING_KEY_MESSAGE: &str = "API key missing. Cannot generate SOAP note.";

/// SOAP note generator calling the Anthropic API
///
/// Without a client every call returns the degraded `{"Error": ..}` note.
#[derive(Debug)]
pub struct LlmSoapGenerator {
    client: Option<AnthropicClient>,
}

impl LlmSoapGenerator {
    pub fn new(client: Option<AnthropicClient>) -> Self {
        if client.is_none() {
            warn!("No API key configured; SOAP notes will be degraded");
        }
        Self { client }
    }
}

#[async_trait]
impl SoapGenerator for LlmSoapGenerator {
    async fn generate(&self, full_text: &str, entities: &EntityBag, summary: &str) -> SoapNote {
        let Some(client) = &self.client else {
            return SoapNote::degraded(MISSING_KEY_MESSAGE);
        };

        info!("Generating SOAP note with {}", client.model());
        let prompt = build_soap_prompt(full_text, entities, summary);

        let result = client
            .send_with_tool(SOAP_SYSTEM_PROMPT, &prompt, soap_tool())
            .await
            .and_then(|input| validate_soap(&input));

        match result {
            Ok(sections) => SoapNote::Note(sections),
            Err(e) => {
                warn!("SOAP generation failed: {:#}", e);
                SoapNote::degraded(format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::AnthropicConfig;

    #[tokio::test]
    async fn test_missing_client_degrades() {
        let generator = LlmSoapGenerator::new(None);
        let note = generator
            .generate("Doctor: hi", &EntityBag::empty(), "")
            .await;

        assert_eq!(note, SoapNote::degraded(MISSING_KEY_MESSAGE));
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["Error"], MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_request_failure_degrades() {
        let config = AnthropicConfig::new("key".into(), "model".into())
            .with_base_url("http://127.0.0.1:9");
        let generator = LlmSoapGenerator::new(Some(AnthropicClient::new(config)));

        let note = generator
            .generate("Patient: my neck hurts", &EntityBag::empty(), "Neck pain.")
            .await;

        let SoapNote::Degraded { error } = &note else {
            panic!("expected a degraded note, got {:?}", note);
        };
        assert!(error.contains("Failed to send request"));
        assert!(serde_json::to_value(&note).unwrap()["Error"].is_string());
    }
}
