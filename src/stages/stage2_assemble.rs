use crate::config::PipelineConfig;
use crate::models::{
    ClosedLabel, EntityBag, Intent, MedicalReport, ReportSet, Sentiment, SentimentReport, SoapNote,
};

use super::AnalysisResult;

pub const SOAP_UNAVAILABLE_MESSAGE: &str = "SOAP generator unavailable. Cannot generate SOAP note.";

/// Execute Stage 2: merge collaborator results into the three documents
///
/// Degraded stages become empty collections, an empty summary, fallback
/// labels, or an `{"Error": ..}` SOAP note. The SOAP note is passed through
/// as produced.
pub fn execute_stage2(analysis: &AnalysisResult, config: &PipelineConfig) -> ReportSet {
    let empty_bag = EntityBag::empty();
    let entities = analysis.entities.as_ref().unwrap_or(&empty_bag);
    let summary = analysis.summary.as_deref().unwrap_or_default();

    let medical = MedicalReport::from_parts(
        entities,
        summary,
        &config.patient_name,
        &config.status_placeholder,
    );

    let sentiment = SentimentReport {
        sentiment: analysis.sentiment.unwrap_or(Sentiment::FALLBACK),
        intent: analysis.intent.unwrap_or(Intent::FALLBACK),
    };

    let soap = analysis
        .soap
        .clone()
        .unwrap_or_else(|| SoapNote::degraded(SOAP_UNAVAILABLE_MESSAGE));

    ReportSet {
        medical,
        sentiment,
        soap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityCategory, SoapSections};

    #[test]
    fn test_everything_degraded() {
        let reports = execute_stage2(&AnalysisResult::default(), &PipelineConfig::default());

        assert!(reports.medical.symptoms.is_empty());
        assert!(reports.medical.keywords.is_empty());
        assert_eq!(reports.medical.summary, "");
        assert_eq!(reports.medical.patient_name, "Unknown");
        assert_eq!(reports.sentiment.sentiment, Sentiment::Neutral);
        assert_eq!(reports.sentiment.intent, Intent::ReportingSymptoms);
        assert_eq!(reports.soap, SoapNote::degraded(SOAP_UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn test_results_passed_through() {
        let mut bag = EntityBag::empty();
        bag.insert(EntityCategory::Diseases, "whiplash");
        bag.insert(EntityCategory::Chemicals, "ibuprofen");
        let note = SoapNote::Note(SoapSections::default());

        let analysis = AnalysisResult {
            entities: Some(bag),
            summary: Some("Rear-end collision.".to_string()),
            sentiment: Some(Sentiment::Reassured),
            intent: Some(Intent::SeekingReassurance),
            soap: Some(note.clone()),
            degraded: vec![],
        };
        let config = PipelineConfig {
            patient_name: "Janet Jones".to_string(),
            ..Default::default()
        };

        let reports = execute_stage2(&analysis, &config);

        assert_eq!(reports.medical.patient_name, "Janet Jones");
        assert_eq!(reports.medical.diagnosis, vec!["whiplash"]);
        assert_eq!(reports.medical.treatment, vec!["ibuprofen"]);
        assert_eq!(reports.medical.summary, "Rear-end collision.");
        assert_eq!(reports.sentiment.intent, Intent::SeekingReassurance);
        assert_eq!(reports.soap, note);
    }
}
