use std::path::PathBuf;

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Characters of transcript handed to the API summarizer
    pub summary_char_budget: usize,
    /// Sentences kept by the offline summarizer
    pub summary_max_sentences: usize,
    /// Value of `Patient_Name`; names are never extracted from the transcript
    pub patient_name: String,
    /// Value of `Current_Status` and `Prognosis`
    pub status_placeholder: String,
    /// Custom lexicon JSON for entity extraction and offline summaries
    pub lexicon_path: Option<PathBuf>,
    /// Never call the API, even if a key is configured
    pub offline: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_char_budget: 2500,
            summary_max_sentences: 3,
            patient_name: "Unknown".to_string(),
            status_placeholder: "See summary".to_string(),
            lexicon_path: None,
            offline: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.summary_char_budget, 2500);
        assert_eq!(config.status_placeholder, "See summary");
        assert!(!config.offline);
    }
}
