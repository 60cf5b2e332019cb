use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::EntityExtractor;
use crate::heuristics::Lexicon;
use crate::models::EntityBag;

/// Entity extractor backed by a clinical lexicon
#[derive(Debug, Clone)]
pub struct LexiconEntityExtractor {
    lexicon: Lexicon,
}

impl LexiconEntityExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Load the lexicon from `path`, or use the built-in one
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let lexicon = match path {
            Some(path) => Lexicon::from_file(path)?,
            None => Lexicon::default(),
        };
        Ok(Self::new(lexicon))
    }
}

#[async_trait]
impl EntityExtractor for LexiconEntityExtractor {
    async fn extract(&self, text: &str) -> Result<EntityBag> {
        Ok(self.lexicon.extract(text))
    }
}
