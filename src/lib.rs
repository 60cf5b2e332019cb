pub mod collaborators;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use collaborators::{
    Collaborators, EntityExtractor, LexiconEntityExtractor, PatientClassifier, SoapGenerator,
    Summarizer,
};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use io::{load_transcript, read_transcript, write_json};
pub use llm::{AnthropicClient, AnthropicConfig};
pub use models::{keywords, EntityBag, Intent, ReportSet, Sentiment, SoapNote, Transcript, Turn};
pub use pipeline::{PipelineRun, ReportAssembler, RunSummary};
pub use stages::{execute_stage3, segment, Stage3Config};
