use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{EntityBag, EntityCategory};

/// Clinical term list used for offline entity matching
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// (category, lowercase term)
    terms: Vec<(EntityCategory, String)>,
}

/// A lexicon hit in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconMatch {
    pub category: EntityCategory,
    /// Byte offsets into the original text
    pub start: usize,
    pub end: usize,
}

impl Lexicon {
    /// Build from category -> terms lists; blank terms are skipped
    pub fn from_bag(bag: &EntityBag) -> Self {
        let terms = bag
            .iter()
            .flat_map(|(category, list)| {
                list.iter()
                    .map(|t| t.trim().to_ascii_lowercase())
                    .filter(|t| !t.is_empty())
                    .map(move |t| (category, t))
            })
            .collect();
        Self { terms }
    }

    /// Load a JSON lexicon shaped like an entity bag
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon: {:?}", path))?;
        let raw: EntityBag = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse lexicon JSON: {:?}", path))?;
        let lexicon = Self::from_bag(&EntityBag::from_raw(raw));
        if lexicon.is_empty() {
            anyhow::bail!("Lexicon {:?} contains no terms", path);
        }
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Find non-overlapping term matches, longest match first at each position
    pub fn find(&self, text: &str) -> Vec<LexiconMatch> {
        let lowered = text.to_ascii_lowercase();
        let haystack = lowered.as_str();

        let mut hits: Vec<LexiconMatch> = self
            .terms
            .iter()
            .flat_map(|(category, term)| {
                find_phrase(haystack, term).map(move |(start, end)| LexiconMatch {
                    category: *category,
                    start,
                    end,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.start.cmp(&b.start).then((b.end - b.start).cmp(&(a.end - a.start))));

        let mut result = Vec::with_capacity(hits.len());
        let mut last_end = 0;
        for hit in hits {
            if hit.start < last_end {
                continue;
            }
            last_end = hit.end;
            result.push(hit);
        }
        result
    }

    /// Extract an entity bag, keeping the surface text as written
    pub fn extract(&self, text: &str) -> EntityBag {
        let mut bag = EntityBag::empty();
        for hit in self.find(text) {
            bag.insert(hit.category, &text[hit.start..hit.end]);
        }
        bag
    }

    /// Number of term hits in the text
    pub fn count(&self, text: &str) -> usize {
        self.find(text).len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut bag = EntityBag::empty();
        let lists: [(EntityCategory, &[&str]); 4] = [
            (EntityCategory::Diseases, DISEASES),
            (EntityCategory::Chemicals, CHEMICALS),
            (EntityCategory::PhysiologicalProcesses, PROCESSES),
            (EntityCategory::BodyParts, BODY_PARTS),
        ];
        for (category, terms) in lists {
            for term in terms {
                bag.insert(category, *term);
            }
        }
        Self::from_bag(&bag)
    }
}

/// Whole-word occurrences of a lowercase phrase in a lowercase haystack
///
/// A single trailing `s` is accepted so plurals match their singular term.
pub(crate) fn find_phrase<'a>(
    haystack: &'a str,
    phrase: &'a str,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    haystack.match_indices(phrase).filter_map(move |(start, m)| {
        let mut end = start + m.len();
        if !is_boundary_before(haystack, start) {
            return None;
        }
        if haystack[end..].starts_with('s') && is_boundary_after(haystack, end + 1) {
            end += 1;
        }
        is_boundary_after(haystack, end).then_some((start, end))
    })
}

fn is_boundary_before(s: &str, idx: usize) -> bool {
    s[..idx]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric())
}

fn is_boundary_after(s: &str, idx: usize) -> bool {
    s[idx..].chars().next().is_none_or(|c| !c.is_alphanumeric())
}

const DISEASES: &[&str] = &[
    "whiplash injury",
    "whiplash",
    "neck pain",
    "back pain",
    "chest pain",
    "headache",
    "migraine",
    "pain",
    "stiffness",
    "injury",
    "fever",
    "cough",
    "nausea",
    "dizziness",
    "fatigue",
    "anxiety",
    "insomnia",
    "hypertension",
    "diabetes",
    "asthma",
    "infection",
    "fracture",
    "sprain",
    "concussion",
    "inflammation",
    "arthritis",
    "depression",
    "shortness of breath",
    "sore throat",
    "swelling",
    "bruising",
];

const CHEMICALS: &[&str] = &[
    "painkiller",
    "analgesic",
    "ibuprofen",
    "paracetamol",
    "acetaminophen",
    "aspirin",
    "antibiotic",
    "amoxicillin",
    "metformin",
    "insulin",
    "codeine",
    "morphine",
    "naproxen",
    "prednisone",
    "lisinopril",
    "caffeine",
    "alcohol",
];

const PROCESSES: &[&str] = &[
    "sleep",
    "breathing",
    "digestion",
    "blood pressure",
    "heart rate",
    "mobility",
    "range of motion",
    "range of movement",
    "recovery",
    "healing",
    "appetite",
    "circulation",
];

const BODY_PARTS: &[&str] = &[
    "neck",
    "lower back",
    "upper back",
    "spine",
    "head",
    "shoulder",
    "chest",
    "knee",
    "arm",
    "leg",
    "muscle",
    "stomach",
    "heart",
    "lung",
    "throat",
    "wrist",
    "ankle",
    "hip",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let lexicon = Lexicon::default();
        let bag = lexicon.extract("I had neck pain and back pain after the accident.");

        assert_eq!(bag.get(EntityCategory::Diseases), ["neck pain", "back pain"]);
        assert!(bag.get(EntityCategory::BodyParts).is_empty());
    }

    #[test]
    fn test_surface_text_and_order_preserved() {
        let lexicon = Lexicon::default();
        let bag = lexicon.extract("Ibuprofen helped. Then I took Painkillers and more Ibuprofen.");

        assert_eq!(bag.get(EntityCategory::Chemicals), ["Ibuprofen", "Painkillers"]);
    }

    #[test]
    fn test_whole_words_only() {
        let lexicon = Lexicon::default();
        let bag = lexicon.extract("The painting in the headroom was nice.");
        assert!(bag.is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let lexicon = Lexicon::default();
        let text = "Whiplash, neck stiffness and trouble with sleep. Whiplash again.";
        assert_eq!(lexicon.extract(text), lexicon.extract(text));
        assert_eq!(lexicon.extract(text).get(EntityCategory::Diseases), ["Whiplash", "stiffness"]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"Chemicals": ["Tylenol"], "Body_Parts": ["elbow"]}"#).unwrap();

        let lexicon = Lexicon::from_file(&path).unwrap();
        assert_eq!(lexicon.len(), 2);

        let dup = dir.path().join("dup.json");
        std::fs::write(&dup, r#"{"Diseases": ["flu", "flu ", " "]}"#).unwrap();
        assert_eq!(Lexicon::from_file(&dup).unwrap().len(), 1);

        let bag = lexicon.extract("tylenol for the elbow");
        assert_eq!(bag.get(EntityCategory::Chemicals), ["tylenol"]);
        assert_eq!(bag.get(EntityCategory::BodyParts), ["elbow"]);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Lexicon::from_file(&dir.path().join("missing.json")).is_err());

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "{}").unwrap();
        assert!(Lexicon::from_file(&empty).is_err());
    }
}
