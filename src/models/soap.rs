use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Sub-field name -> free text, e.g. "Chief_Complaint" -> "Neck pain"
pub type SoapSection = BTreeMap<String, String>;

/// The four required sections of a SOAP note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapSections {
    #[serde(rename = "Subjective")]
    pub subjective: SoapSection,
    #[serde(rename = "Objective")]
    pub objective: SoapSection,
    #[serde(rename = "Assessment")]
    pub assessment: SoapSection,
    #[serde(rename = "Plan")]
    pub plan: SoapSection,
}

pub const SECTION_NAMES: [&str; 4] = ["Subjective", "Objective", "Assessment", "Plan"];

impl SoapSections {
    /// Build sections from loosely-shaped model output
    ///
    /// Section keys match case-insensitively. Non-string sub-field values are
    /// kept as their compact JSON text.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .context("SOAP output is not a JSON object")?;

        let mut sections: [SoapSection; 4] = Default::default();
        for (slot, name) in sections.iter_mut().zip(SECTION_NAMES) {
            let section = object
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
                .with_context(|| format!("SOAP output is missing the {} section", name))?;
            let fields = section
                .as_object()
                .with_context(|| format!("SOAP section {} is not an object", name))?;
            for (field, text) in fields {
                let text = match text {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                slot.insert(field.clone(), text);
            }
        }

        let [subjective, objective, assessment, plan] = sections;
        Ok(Self {
            subjective,
            objective,
            assessment,
            plan,
        })
    }
}

/// SOAP collaborator output: a full note, or a single-field error stand-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoapNote {
    Note(SoapSections),
    Degraded {
        #[serde(rename = "Error")]
        error: String,
    },
}

impl SoapNote {
    pub fn degraded(message: impl Into<String>) -> Self {
        SoapNote::Degraded {
            error: message.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SoapNote::Degraded { .. })
    }
}
