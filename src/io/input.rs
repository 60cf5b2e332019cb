use std::path::Path;

use crate::error::PipelineError;
use crate::models::Transcript;
use crate::stages::segment;

/// Read a transcript file; a missing or unreadable file aborts the run
pub fn read_transcript(path: &Path) -> Result<String, PipelineError> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and segment a transcript file
pub fn load_transcript(path: &Path) -> Result<Transcript, PipelineError> {
    Ok(segment(&read_transcript(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speaker;

    #[test]
    fn test_load_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        std::fs::write(&path, "Physician: Hello.\nPatient: Hi, my neck hurts.\n").unwrap();

        let transcript = load_transcript(&path).unwrap();
        assert_eq!(transcript.turns.len(), 2);
        assert_eq!(transcript.turns[0].speaker, Speaker::Doctor);
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_transcript(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
