use serde::{Deserialize, Serialize};

/// A label drawn from a fixed closed set
pub trait ClosedLabel: Sized + Copy + Eq + Send + Sync + 'static {
    /// Every label in the set, in canonical order
    const ALL: &'static [Self];

    /// Label used when there is nothing to classify or the classifier failed
    const FALLBACK: Self;

    fn label(&self) -> &'static str;

    /// Parse a label, ignoring case and surrounding whitespace/punctuation
    fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().trim_matches(|c: char| c == '"' || c == '.' || c == '\'');
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(cleaned))
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|l| l.label()).collect()
    }
}

/// Patient sentiment over the visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Anxious,
    Neutral,
    Reassured,
}

impl ClosedLabel for Sentiment {
    const ALL: &'static [Self] = &[Sentiment::Anxious, Sentiment::Neutral, Sentiment::Reassured];
    const FALLBACK: Self = Sentiment::Neutral;

    fn label(&self) -> &'static str {
        match self {
            Sentiment::Anxious => "Anxious",
            Sentiment::Neutral => "Neutral",
            Sentiment::Reassured => "Reassured",
        }
    }
}

/// What the patient is trying to do in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "Seeking reassurance")]
    SeekingReassurance,
    #[serde(rename = "Reporting symptoms")]
    ReportingSymptoms,
    #[serde(rename = "Expressing concern")]
    ExpressingConcern,
}

impl ClosedLabel for Intent {
    const ALL: &'static [Self] = &[
        Intent::SeekingReassurance,
        Intent::ReportingSymptoms,
        Intent::ExpressingConcern,
    ];
    const FALLBACK: Self = Intent::ReportingSymptoms;

    fn label(&self) -> &'static str {
        match self {
            Intent::SeekingReassurance => "Seeking reassurance",
            Intent::ReportingSymptoms => "Reporting symptoms",
            Intent::ExpressingConcern => "Expressing concern",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
