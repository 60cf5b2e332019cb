use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::collaborators::Collaborators;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::io::read_transcript;
use crate::models::{ReportSet, Transcript};
use crate::stages::{execute_stage1, execute_stage2, segment, Stage};

/// What happened during one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub turns: usize,
    pub degraded_stages: Vec<Stage>,
}

/// Output of one run
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub transcript: Transcript,
    pub reports: ReportSet,
    pub summary: RunSummary,
}

/// Runs segmentation, the collaborators and report assembly
///
/// Collaborators are injected and reused for every run of this assembler.
pub struct ReportAssembler {
    collaborators: Collaborators,
    config: PipelineConfig,
}

impl ReportAssembler {
    /// Fails only when not a single collaborator is available
    pub fn new(collaborators: Collaborators, config: PipelineConfig) -> Result<Self, PipelineError> {
        if collaborators.available() == 0 {
            return Err(PipelineError::NoCollaborators);
        }
        Ok(Self {
            collaborators,
            config,
        })
    }

    /// Produce all three documents for a raw transcript
    pub async fn run(&self, raw_text: &str) -> PipelineRun {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);
        self.run_inner(run_id, raw_text).instrument(span).await
    }

    /// Read a transcript file and run it; an unreadable file aborts before any collaborator runs
    pub async fn run_file(&self, path: &Path) -> Result<PipelineRun, PipelineError> {
        let raw_text = read_transcript(path)?;
        Ok(self.run(&raw_text).await)
    }

    async fn run_inner(&self, run_id: Uuid, raw_text: &str) -> PipelineRun {
        let started_at = Utc::now();
        let timer = Instant::now();

        info!("Stage 0: segmenting transcript...");
        let transcript = segment(raw_text);
        let (doctor_turns, patient_turns) = transcript.turn_counts();
        info!(
            "Stage 0: {} turns ({} doctor, {} patient)",
            transcript.turns.len(),
            doctor_turns,
            patient_turns
        );

        let analysis = execute_stage1(&self.collaborators, &transcript).await;

        info!("Stage 2: assembling reports...");
        let reports = execute_stage2(&analysis, &self.config);

        let summary = RunSummary {
            run_id,
            started_at,
            elapsed_ms: timer.elapsed().as_millis() as u64,
            turns: transcript.turns.len(),
            degraded_stages: analysis.degraded,
        };

        info!(
            "Run complete in {}ms, {} degraded stage(s)",
            summary.elapsed_ms,
            summary.degraded_stages.len()
        );

        PipelineRun {
            transcript,
            reports,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{Classifier, ClassifierBackend, LexiconEntityExtractor, SoapGenerator};
    use crate::collaborators::{ExtractiveSummarizer, LlmSoapGenerator};
    use crate::heuristics::Lexicon;
    use crate::llm::AnthropicConfig;
    use crate::models::{
        ClosedLabel, EntityBag, Intent, Sentiment, SoapNote, SoapSections, Speaker,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    const TRANSCRIPT: &str = "\
Physician: Good morning. How are you feeling today?
Patient: I'm doing better, but I still have some neck pain.
It started after the car accident and I took painkillers.
Doctor: Any trouble with sleep?
Patient: Sometimes. I'm worried it will affect me in the future.
";

    fn offline_collaborators() -> Collaborators {
        Collaborators {
            entities: Some(Arc::new(LexiconEntityExtractor::new(Lexicon::default()))),
            summarizer: Some(Arc::new(ExtractiveSummarizer::new(Lexicon::default(), 2))),
            classifier: Some(Arc::new(Classifier::new(ClassifierBackend::cues()))),
            soap: Some(Arc::new(LlmSoapGenerator::new(None))),
        }
    }

    struct TemplateSoap;

    #[async_trait]
    impl SoapGenerator for TemplateSoap {
        async fn generate(&self, _full_text: &str, entities: &EntityBag, summary: &str) -> SoapNote {
            let mut sections = SoapSections::default();
            sections
                .subjective
                .insert("Chief_Complaint".to_string(), format!("{} entities", entities.total()));
            sections.plan.insert("Follow_Up".to_string(), summary.to_string());
            SoapNote::Note(sections)
        }
    }

    #[test]
    fn test_no_collaborators_is_fatal() {
        let result = ReportAssembler::new(Collaborators::default(), PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::NoCollaborators)));
    }

    #[tokio::test]
    async fn test_offline_run_without_api_key() {
        let assembler =
            ReportAssembler::new(offline_collaborators(), PipelineConfig::default()).unwrap();

        let run = assembler.run(TRANSCRIPT).await;

        assert_eq!(run.transcript.turns.len(), 4);
        assert_eq!(run.transcript.turns[0].speaker, Speaker::Doctor);

        let medical = &run.reports.medical;
        assert_eq!(medical.symptoms, vec!["neck pain"]);
        assert_eq!(medical.diagnosis, medical.symptoms);
        assert_eq!(medical.treatment, vec!["painkillers"]);
        assert!(medical.keywords.contains(&"sleep".to_string()));
        assert!(!medical.summary.is_empty());

        assert!(Sentiment::ALL.contains(&run.reports.sentiment.sentiment));
        assert!(Intent::ALL.contains(&run.reports.sentiment.intent));

        // only SOAP degrades without a key
        assert!(run.reports.soap.is_degraded());
        assert_eq!(run.summary.degraded_stages, vec![Stage::Soap]);
    }

    #[tokio::test]
    async fn test_soap_receives_hints() {
        let mut collaborators = offline_collaborators();
        collaborators.soap = Some(Arc::new(TemplateSoap));
        let assembler = ReportAssembler::new(collaborators, PipelineConfig::default()).unwrap();

        let run = assembler.run(TRANSCRIPT).await;

        let SoapNote::Note(sections) = &run.reports.soap else {
            panic!("expected a full SOAP note");
        };
        assert_ne!(sections.subjective["Chief_Complaint"], "0 entities");
        assert_eq!(sections.plan["Follow_Up"], run.reports.medical.summary);
        assert!(run.summary.degraded_stages.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_api_keeps_other_documents() {
        let api = AnthropicConfig::new("key".into(), "model".into())
            .with_base_url("http://127.0.0.1:9");
        let config = PipelineConfig::default();
        let collaborators = Collaborators::from_config(&config, Some(&api));
        let assembler = ReportAssembler::new(collaborators, config).unwrap();

        let run = assembler.run(TRANSCRIPT).await;

        assert!(run.reports.soap.is_degraded());

        let medical = serde_json::to_value(&run.reports.medical).unwrap();
        assert!(medical.get("Error").is_none());
        assert_eq!(run.reports.medical.symptoms, vec!["neck pain"]);

        let sentiment = serde_json::to_value(&run.reports.sentiment).unwrap();
        assert!(sentiment.get("Error").is_none());
        assert_eq!(run.reports.sentiment.sentiment, Sentiment::Neutral);
        assert_eq!(run.reports.sentiment.intent, Intent::ReportingSymptoms);

        assert_eq!(
            run.summary.degraded_stages,
            vec![Stage::Summary, Stage::Sentiment, Stage::Intent, Stage::Soap]
        );
    }

    #[tokio::test]
    async fn test_transcript_without_headers() {
        let assembler =
            ReportAssembler::new(offline_collaborators(), PipelineConfig::default()).unwrap();

        let run = assembler.run("no speakers here\njust notes").await;

        assert!(run.transcript.is_empty());
        assert_eq!(run.reports.sentiment.sentiment, Sentiment::Neutral);
        assert_eq!(run.reports.sentiment.intent, Intent::ReportingSymptoms);
        assert_eq!(run.reports.medical.summary, "");
        assert!(run.summary.degraded_stages.contains(&Stage::Summary));
    }

    #[tokio::test]
    async fn test_run_file_missing_input() {
        let assembler =
            ReportAssembler::new(offline_collaborators(), PipelineConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = assembler
            .run_file(&dir.path().join("transcript.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));
    }
}
