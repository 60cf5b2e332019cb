use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a pipeline run
///
/// Collaborator failures are not represented here; they degrade to
/// placeholder values inside the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transcript {path:?} could not be read: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no collaborator could be constructed")]
    NoCollaborators,
}
