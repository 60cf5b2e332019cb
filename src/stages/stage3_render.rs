use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::io::write_json;
use crate::models::ReportSet;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    pub medical_file: String,
    pub sentiment_file: String,
    pub soap_file: String,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            medical_file: "medical_report.json".to_string(),
            sentiment_file: "sentiment_analysis.json".to_string(),
            soap_file: "soap_note.json".to_string(),
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    pub medical_path: PathBuf,
    pub sentiment_path: PathBuf,
    pub soap_path: PathBuf,
}

/// Execute Stage 3: write the three documents into `output_dir`
///
/// The directory is created if needed. Each document is its own file.
pub fn execute_stage3(
    reports: &ReportSet,
    output_dir: &Path,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let result = Stage3Result {
        medical_path: output_dir.join(&config.medical_file),
        sentiment_path: output_dir.join(&config.sentiment_file),
        soap_path: output_dir.join(&config.soap_file),
    };

    // Every write is attempted; one failure does not block the others
    let attempts = [
        ("medical report", &result.medical_path, write_json(&reports.medical, &result.medical_path)),
        ("sentiment report", &result.sentiment_path, write_json(&reports.sentiment, &result.sentiment_path)),
        ("SOAP note", &result.soap_path, write_json(&reports.soap, &result.soap_path)),
    ];

    let mut failures = Vec::new();
    for (name, path, outcome) in attempts {
        match outcome {
            Ok(()) => info!("Wrote {} to {:?}", name, path),
            Err(e) => {
                warn!("Failed to write {}: {:#}", name, e);
                failures.push(format!("{}: {:#}", name, e));
            }
        }
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "Failed to write {} of 3 documents: {}",
            failures.len(),
            failures.join("; ")
        );
    }

    Ok(result)
}
