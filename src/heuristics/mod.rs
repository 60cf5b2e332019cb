pub mod cues;
pub mod extractive;
pub mod lexicon;

pub use cues::*;
pub use extractive::*;
pub use lexicon::*;
