use anyhow::{Context, Result};

use crate::models::{ClosedLabel, SoapSections};

/// Check a `submit_label` tool input against the closed label set
pub fn validate_label<L: ClosedLabel>(input: &serde_json::Value) -> Result<L> {
    let raw = input
        .get("label")
        .and_then(|v| v.as_str())
        .context("Tool input has no string `label` field")?;

    L::parse(raw).with_context(|| {
        format!(
            "Label {:?} is not one of the allowed labels {:?}",
            raw,
            L::labels()
        )
    })
}

/// Check a `submit_soap_note` tool input has all four sections
pub fn validate_soap(input: &serde_json::Value) -> Result<SoapSections> {
    let sections = SoapSections::from_value(input)?;

    let empty: Vec<&str> = [
        ("Subjective", &sections.subjective),
        ("Objective", &sections.objective),
        ("Assessment", &sections.assessment),
        ("Plan", &sections.plan),
    ]
    .into_iter()
    .filter(|(_, s)| s.is_empty())
    .map(|(name, _)| name)
    .collect();

    if empty.len() == 4 {
        anyhow::bail!("SOAP note has no content in any section");
    }

    Ok(sections)
}

/// A summary is only accepted when it has text
pub fn validate_summary(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Summarizer returned an empty summary");
    }
    Ok(text.to_string())
}
