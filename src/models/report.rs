use serde::{Deserialize, Serialize};

use super::{keywords, EntityBag, EntityCategory, Intent, Sentiment, SoapNote};

/// Structured medical report built from entities and the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalReport {
    /// Not extracted from the transcript; always the configured placeholder
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Vec<String>,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Current_Status")]
    pub current_status: String,
    #[serde(rename = "Prognosis")]
    pub prognosis: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Keywords")]
    pub keywords: Vec<String>,
}

impl MedicalReport {
    /// Merge entity and summary results into the report
    ///
    /// Symptoms and Diagnosis both come from the disease category.
    pub fn from_parts(
        entities: &EntityBag,
        summary: &str,
        patient_name: &str,
        status_placeholder: &str,
    ) -> Self {
        let diseases = entities.get(EntityCategory::Diseases).to_vec();
        Self {
            patient_name: patient_name.to_string(),
            symptoms: diseases.clone(),
            diagnosis: diseases,
            treatment: entities.get(EntityCategory::Chemicals).to_vec(),
            current_status: status_placeholder.to_string(),
            prognosis: status_placeholder.to_string(),
            summary: summary.to_string(),
            keywords: keywords(entities).into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReport {
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Intent")]
    pub intent: Intent,
}

/// The three output documents of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSet {
    pub medical: MedicalReport,
    pub sentiment: SentimentReport,
    pub soap: SoapNote,
}
