use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use notetaker::{
    execute_stage3, keywords, load_transcript, AnthropicConfig, Collaborators, EntityExtractor,
    LexiconEntityExtractor, PipelineConfig, ReportAssembler, Stage3Config,
};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(author, version, about = "Doctor-patient transcript to clinical reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the medical, sentiment and SOAP reports for a transcript
    Process {
        /// Transcript text file (`Doctor:` / `Physician:` / `Patient:` lines)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the three JSON reports
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Custom lexicon JSON for entity extraction
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Value written to Patient_Name
        #[arg(long, default_value = "Unknown")]
        patient_name: String,

        /// Do not call the API even if ANTHROPIC_API_KEY is set
        #[arg(long)]
        offline: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the speaker turns parsed from a transcript
    Segment {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the clinical entities and keywords found in a transcript
    Entities {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        lexicon: Option<PathBuf>,

        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            lexicon,
            patient_name,
            offline,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                patient_name,
                lexicon_path: lexicon,
                offline,
                ..Default::default()
            };
            process_transcript(input, output_dir, config).await
        }
        Commands::Segment { input, verbose } => {
            setup_logging(verbose);
            show_segments(input)
        }
        Commands::Entities {
            input,
            lexicon,
            verbose,
        } => {
            setup_logging(verbose);
            show_entities(input, lexicon).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn process_transcript(input: PathBuf, output_dir: PathBuf, config: PipelineConfig) -> Result<()> {
    dotenvy::dotenv().ok();

    let api = if config.offline {
        info!("Offline mode: API-backed collaborators disabled");
        None
    } else {
        match AnthropicConfig::from_env() {
            Ok(api) => Some(api),
            Err(e) => {
                warn!("{:#}; using offline collaborators", e);
                None
            }
        }
    };

    let collaborators = Collaborators::from_config(&config, api.as_ref());
    let assembler = ReportAssembler::new(collaborators, config)?;

    info!("Loading transcript from {:?}", input);
    let run = assembler
        .run_file(&input)
        .await
        .context("Failed to process transcript")?;

    let written = execute_stage3(&run.reports, &output_dir, &Stage3Config::default())?;

    println!("Run {}", run.summary.run_id);
    println!("Turns: {}", run.summary.turns);
    println!("Elapsed: {}ms", run.summary.elapsed_ms);
    if run.summary.degraded_stages.is_empty() {
        println!("Degraded stages: none");
    } else {
        let names: Vec<String> = run
            .summary
            .degraded_stages
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!("Degraded stages: {}", names.join(", "));
    }
    println!("Generated:");
    println!("  {}", written.medical_path.display());
    println!("  {}", written.sentiment_path.display());
    println!("  {}", written.soap_path.display());

    Ok(())
}

fn show_segments(input: PathBuf) -> Result<()> {
    let transcript = load_transcript(&input)?;

    println!("Transcript Turns");
    println!("================");
    for (i, turn) in transcript.turns.iter().enumerate() {
        println!("[{}] {}: {}", i, turn.speaker, turn.text);
    }
    println!();

    let (doctor, patient) = transcript.turn_counts();
    println!("Doctor turns: {}", doctor);
    println!("Patient turns: {}", patient);
    println!("Full text: {} chars", transcript.full_text().chars().count());
    println!("Patient text: {} chars", transcript.patient_text().chars().count());

    Ok(())
}

async fn show_entities(input: PathBuf, lexicon: Option<PathBuf>) -> Result<()> {
    let transcript = load_transcript(&input)?;
    let extractor = LexiconEntityExtractor::load(lexicon.as_deref())?;
    let bag = extractor.extract(&transcript.full_text()).await?;

    println!("{}", serde_json::to_string_pretty(&bag)?);
    println!();
    let keywords: Vec<String> = keywords(&bag).into_iter().collect();
    println!("Keywords: {}", keywords.join(", "));

    Ok(())
}
