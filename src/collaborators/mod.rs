pub mod classifier;
pub mod entities;
pub mod soap;
pub mod summarizer;
pub mod traits;

pub use classifier::*;
pub use entities::*;
pub use soap::*;
pub use summarizer::*;
pub use traits::*;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::heuristics::Lexicon;
use crate::llm::{AnthropicClient, AnthropicConfig};

/// The collaborators available to one run
///
/// A `None` slot is a collaborator that failed construction; the stages it
/// feeds degrade instead of aborting.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub entities: Option<Arc<dyn EntityExtractor>>,
    pub summarizer: Option<Arc<dyn Summarizer>>,
    pub classifier: Option<Arc<dyn PatientClassifier>>,
    pub soap: Option<Arc<dyn SoapGenerator>>,
}

impl Collaborators {
    /// Construct each collaborator once from configuration
    ///
    /// With `api` set, the summarizer, classifier and SOAP generator each get
    /// their own API client; otherwise offline backends are used.
    pub fn from_config(config: &PipelineConfig, api: Option<&AnthropicConfig>) -> Self {
        let api = if config.offline { None } else { api };
        let client = || api.cloned().map(AnthropicClient::new);

        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::from_file(path),
            None => Ok(Lexicon::default()),
        };
        if let Err(e) = &lexicon {
            warn!("Lexicon unavailable: {:#}", e);
        }

        let entities: Option<Arc<dyn EntityExtractor>> = match &lexicon {
            Ok(lexicon) => Some(Arc::new(LexiconEntityExtractor::new(lexicon.clone()))),
            Err(_) => None,
        };

        let summarizer: Option<Arc<dyn Summarizer>> = match (client(), &lexicon) {
            (Some(client), _) => Some(Arc::new(LlmSummarizer::new(
                client,
                config.summary_char_budget,
            ))),
            (None, Ok(lexicon)) => Some(Arc::new(ExtractiveSummarizer::new(
                lexicon.clone(),
                config.summary_max_sentences,
            ))),
            (None, Err(_)) => None,
        };

        let classifier: Arc<dyn PatientClassifier> = Arc::new(Classifier::from_client(client()));
        let soap: Arc<dyn SoapGenerator> = Arc::new(LlmSoapGenerator::new(client()));

        let collaborators = Self {
            entities,
            summarizer,
            classifier: Some(classifier),
            soap: Some(soap),
        };
        info!(
            "Constructed {} of 4 collaborators ({})",
            collaborators.available(),
            if api.is_some() { "api" } else { "offline" }
        );
        collaborators
    }

    /// Number of collaborators that were constructed
    pub fn available(&self) -> usize {
        [
            self.entities.is_some(),
            self.summarizer.is_some(),
            self.classifier.is_some(),
            self.soap.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
