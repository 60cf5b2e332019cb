use serde::{Deserialize, Serialize};

/// Speaker identity attached to a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    /// Clinician side of the conversation (`Doctor:` or `Physician:` headers)
    Doctor,
    /// Patient side of the conversation
    Patient,
}

impl Speaker {
    /// Match a header label such as "doctor" or "PHYSICIAN", ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("doctor") || label.eq_ignore_ascii_case("physician") {
            Some(Speaker::Doctor)
        } else if label.eq_ignore_ascii_case("patient") {
            Some(Speaker::Patient)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Doctor => "Doctor",
            Speaker::Patient => "Patient",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous utterance attributed to a single speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub fn is_patient(&self) -> bool {
        self.speaker == Speaker::Patient
    }
}

/// Segmented transcript: turns in dialogue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turn text, space-joined in order
    pub fn full_text(&self) -> String {
        join_text(self.turns.iter())
    }

    /// Text of patient turns only, space-joined in order
    pub fn patient_text(&self) -> String {
        join_text(self.turns.iter().filter(|t| t.is_patient()))
    }

    /// Number of turns per speaker as (doctor, patient)
    pub fn turn_counts(&self) -> (usize, usize) {
        let patient = self.turns.iter().filter(|t| t.is_patient()).count();
        (self.turns.len() - patient, patient)
    }
}

fn join_text<'a>(turns: impl Iterator<Item = &'a Turn>) -> String {
    turns.map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_from_label() {
        assert_eq!(Speaker::from_label("Doctor"), Some(Speaker::Doctor));
        assert_eq!(Speaker::from_label("PHYSICIAN"), Some(Speaker::Doctor));
        assert_eq!(Speaker::from_label("patient"), Some(Speaker::Patient));
        assert_eq!(Speaker::from_label("Nurse"), None);
    }

    #[test]
    fn test_derived_views() {
        let transcript = Transcript::new(vec![
            Turn::new(Speaker::Doctor, "How are you?"),
            Turn::new(Speaker::Patient, "Not great."),
            Turn::new(Speaker::Doctor, "Tell me more."),
            Turn::new(Speaker::Patient, "My neck hurts."),
        ]);

        assert_eq!(
            transcript.full_text(),
            "How are you? Not great. Tell me more. My neck hurts."
        );
        assert_eq!(transcript.patient_text(), "Not great. My neck hurts.");
        assert_eq!(transcript.turn_counts(), (2, 2));
    }

    #[test]
    fn test_no_patient_turns() {
        let transcript = Transcript::new(vec![Turn::new(Speaker::Doctor, "Hello.")]);
        assert_eq!(transcript.patient_text(), "");
    }
}
