use crate::models::{ClosedLabel, Intent, Sentiment};

use super::lexicon::find_phrase;

/// Cue-phrase scorer for a closed label set
///
/// Each label owns a list of lowercase cue phrases; the label with the most
/// whole-word cue hits wins. No hits, or a tie that includes the fallback
/// label, yields the fallback. Other ties go to the label listed first.
#[derive(Debug, Clone)]
pub struct CueScorer<L: ClosedLabel> {
    cues: Vec<(L, Vec<String>)>,
}

impl<L: ClosedLabel> CueScorer<L> {
    pub fn new(cues: Vec<(L, Vec<String>)>) -> Self {
        Self { cues }
    }

    /// Hit count per label, in `L::ALL` order
    pub fn scores(&self, text: &str) -> Vec<(L, usize)> {
        let haystack = text.to_ascii_lowercase();
        L::ALL
            .iter()
            .map(|label| {
                let hits = self
                    .cues
                    .iter()
                    .filter(|(l, _)| l == label)
                    .flat_map(|(_, phrases)| phrases.iter())
                    .map(|p| find_phrase(&haystack, p).count())
                    .sum();
                (*label, hits)
            })
            .collect()
    }

    pub fn classify(&self, text: &str) -> L {
        if text.trim().is_empty() {
            return L::FALLBACK;
        }

        let scores = self.scores(text);
        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if best == 0 {
            return L::FALLBACK;
        }

        let leaders: Vec<L> = scores
            .into_iter()
            .filter(|(_, s)| *s == best)
            .map(|(l, _)| l)
            .collect();

        if leaders.contains(&L::FALLBACK) {
            L::FALLBACK
        } else {
            leaders[0]
        }
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

impl Default for CueScorer<Sentiment> {
    fn default() -> Self {
        Self::new(vec![
            (
                Sentiment::Anxious,
                phrases(&[
                    "worried", "worry", "worrying", "anxious", "nervous", "scared", "afraid",
                    "frightened", "concerned", "stressed", "panic", "what if", "not sure",
                ]),
            ),
            (
                Sentiment::Neutral,
                phrases(&["okay", "alright", "fine", "i see", "i guess"]),
            ),
            (
                Sentiment::Reassured,
                phrases(&[
                    "relieved", "relief", "reassured", "reassuring", "good to hear", "great",
                    "thank you", "thanks", "glad", "better", "appreciate", "makes sense",
                ]),
            ),
        ])
    }
}

impl Default for CueScorer<Intent> {
    fn default() -> Self {
        Self::new(vec![
            (
                Intent::SeekingReassurance,
                phrases(&[
                    "will i", "will it", "will this", "should i", "do i need", "is it normal",
                    "is that normal", "do you think", "is it serious", "hope", "going to be okay",
                    "in the future", "long-term",
                ]),
            ),
            (
                Intent::ReportingSymptoms,
                phrases(&[
                    "pain", "hurt", "hurts", "ache", "sore", "stiff", "stiffness", "i had",
                    "i have", "i feel", "i felt", "been having", "trouble", "headache",
                    "couldn't", "can't sleep",
                ]),
            ),
            (
                Intent::ExpressingConcern,
                phrases(&[
                    "worried", "worry", "concerned", "afraid", "scared", "nervous", "bothering",
                    "frightened",
                ]),
            ),
        ])
    }
}
