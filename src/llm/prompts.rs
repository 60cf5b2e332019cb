use crate::llm::Tool;
use crate::models::{EntityBag, SECTION_NAMES};

/// System prompt for the clinical summary
pub const SUMMARY_SYSTEM_PROMPT: &str = r#"You are a clinical summarizer.

Condense the doctor-patient conversation you are given into a short clinical narrative:
- what happened to the patient and when
- symptoms reported and how they changed
- treatment received so far
- the doctor's findings and outlook

Write plain prose in the third person. Do not invent facts that are not in the conversation.
Respond with the summary only."#;

/// System prompt for closed-set classification of patient text
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"You classify what a patient says during a medical consultation.

You will be given the patient's side of the conversation and a fixed list of candidate labels.
Choose exactly ONE label from the list, the one that best describes the patient's text overall.
Never answer with a label that is not in the list.

Use the submit_label tool to give your answer."#;

/// System prompt for SOAP note generation
pub const SOAP_SYSTEM_PROMPT: &str = r#"You are an expert medical scribe.

Convert the provided doctor-patient transcript into a professional SOAP note.

Use these sections and sub-fields:
- Subjective: Chief_Complaint, History_of_Present_Illness
- Objective: Physical_Exam, Observations
- Assessment: Diagnosis, Analysis
- Plan: Treatment, Follow_Up

Every sub-field value is plain text. Only use information present in the transcript;
write "Not documented" when the transcript says nothing for a sub-field.

Use the submit_soap_note tool to give your answer."#;

/// Build the user prompt for the summary
pub fn build_summary_prompt(text: &str) -> String {
    format!("# Conversation\n\n{}\n", text)
}

/// Build the user prompt for a closed-set classification
pub fn build_label_prompt(task: &str, text: &str, labels: &[&str]) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("# Task\n\nClassify the patient's {}.\n\n", task));

    prompt.push_str("# Candidate Labels\n\n");
    for label in labels {
        prompt.push_str(&format!("- {}\n", label));
    }
    prompt.push('\n');

    prompt.push_str("# Patient Text\n\n");
    prompt.push_str(text);
    prompt.push('\n');

    prompt
}

/// Build the user prompt for the SOAP note
///
/// Entities and summary are optional hints; empty ones are left out.
pub fn build_soap_prompt(transcript: &str, entities: &EntityBag, summary: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("# Transcript\n\n");
    prompt.push_str(transcript);
    prompt.push_str("\n\n");

    if !entities.is_empty() {
        prompt.push_str("# Extracted Entities (hints)\n\n");
        for (category, list) in entities.iter() {
            if !list.is_empty() {
                prompt.push_str(&format!("- {}: {}\n", category.name(), list.join(", ")));
            }
        }
        prompt.push('\n');
    }

    if !summary.trim().is_empty() {
        prompt.push_str("# Summary (hint)\n\n");
        prompt.push_str(summary.trim());
        prompt.push_str("\n\n");
    }

    prompt.push_str("Write the SOAP note for this transcript.\n");

    prompt
}

/// Tool whose single `label` argument is restricted to `labels`
pub fn label_tool(labels: &[&str]) -> Tool {
    Tool {
        name: "submit_label".to_string(),
        description: "Submit the single chosen label".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "label": {
                    "type": "string",
                    "enum": labels,
                    "description": "Exactly one of the candidate labels"
                }
            },
            "required": ["label"]
        }),
    }
}

/// Tool describing the SOAP note shape
pub fn soap_tool() -> Tool {
    let section = serde_json::json!({
        "type": "object",
        "additionalProperties": {"type": "string"}
    });
    let properties: serde_json::Map<String, serde_json::Value> = SECTION_NAMES
        .iter()
        .map(|name| (name.to_string(), section.clone()))
        .collect();

    Tool {
        name: "submit_soap_note".to_string(),
        description: "Submit the SOAP note".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": SECTION_NAMES,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityCategory;

    #[test]
    fn test_label_prompt_lists_candidates() {
        let prompt = build_label_prompt("sentiment", "I'm worried.", &["Anxious", "Neutral"]);
        assert!(prompt.contains("- Anxious\n"));
        assert!(prompt.contains("- Neutral\n"));
        assert!(prompt.contains("I'm worried."));
    }

    #[test]
    fn test_soap_prompt_skips_empty_hints() {
        let prompt = build_soap_prompt("Doctor said hi.", &EntityBag::empty(), "  ");
        assert!(!prompt.contains("hints"));
        assert!(!prompt.contains("Summary"));

        let mut bag = EntityBag::empty();
        bag.insert(EntityCategory::Diseases, "whiplash");
        let prompt = build_soap_prompt("Doctor said hi.", &bag, "Short summary.");
        assert!(prompt.contains("- Diseases: whiplash"));
        assert!(!prompt.contains("Chemicals"));
        assert!(prompt.contains("Short summary."));
    }

    #[test]
    fn test_tool_schemas() {
        let tool = label_tool(&["A", "B"]);
        assert_eq!(tool.input_schema["properties"]["label"]["enum"][1], "B");

        let soap = soap_tool();
        assert_eq!(soap.input_schema["required"].as_array().unwrap().len(), 4);
        assert!(soap.input_schema["properties"].get("Plan").is_some());
    }
}
