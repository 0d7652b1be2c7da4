use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use taketron::{read_rows, run_pipeline, write_transcript, write_workbook, CancellationToken, TakeConfig};

#[derive(Parser)]
#[command(name = "taketron")]
#[command(author, version, about = "Constraint-aware take partitioner for dubbing-script spreadsheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a dubbing script into takes
    Partition {
        /// Input spreadsheet (.xlsx)
        #[arg(short, long)]
        input: PathBuf,

        /// Output workbook with optimized takes and summary
        #[arg(short, long)]
        output: PathBuf,

        /// Optional plain-text recording transcript
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Restrict processing to these speakers (repeatable); omit to include all
        #[arg(long = "include-speaker")]
        include_speaker: Vec<String>,

        /// Hard cap on take duration, in seconds
        #[arg(long, default_value = "30.0")]
        max_take_duration_seconds: f64,

        /// Hard cap on the number of lines per take
        #[arg(long, default_value = "10")]
        max_lines_per_take: usize,

        /// Hard cap on a speaker's longest consecutive run within a take
        #[arg(long, default_value = "5")]
        max_consecutive_lines_per_speaker: usize,

        /// Hard cap on a speaker's total lines within a take
        #[arg(long, default_value = "5")]
        max_total_lines_per_speaker_in_take: usize,

        /// Maximum effective characters per dialogue line
        #[arg(long, default_value = "60")]
        max_dialogue_line_chars: usize,

        /// Frame rate for the optional `:ff` time-code field
        #[arg(long, default_value = "24.0")]
        frame_rate: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report per-scene and per-speaker statistics without writing output
    Analyze {
        /// Input spreadsheet (.xlsx)
        #[arg(short, long)]
        input: PathBuf,

        /// Restrict processing to these speakers (repeatable); omit to include all
        #[arg(long = "include-speaker")]
        include_speaker: Vec<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Partition {
            input,
            output,
            transcript,
            include_speaker,
            max_take_duration_seconds,
            max_lines_per_take,
            max_consecutive_lines_per_speaker,
            max_total_lines_per_speaker_in_take,
            max_dialogue_line_chars,
            frame_rate,
            verbose,
        } => {
            setup_logging(verbose);
            let config = TakeConfig {
                max_take_duration_seconds,
                max_lines_per_take,
                max_consecutive_lines_per_speaker,
                max_total_lines_per_speaker_in_take,
                max_dialogue_line_chars,
                frame_rate,
            };
            partition_command(input, output, transcript, include_speaker, config)
        }
        Commands::Analyze {
            input,
            include_speaker,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_command(input, include_speaker)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn partition_command(
    input: PathBuf,
    output: PathBuf,
    transcript: Option<PathBuf>,
    include_speaker: Vec<String>,
    config: TakeConfig,
) -> Result<()> {
    info!("loading script from {:?}", input);
    let rows = read_rows(&input).context("failed to read input spreadsheet")?;
    info!("loaded {} rows", rows.len());

    let filter = (!include_speaker.is_empty()).then_some(include_speaker.as_slice());
    let cancel = CancellationToken::new();

    let result = run_pipeline(rows, filter, &config, &cancel)
        .context("partitioning was cancelled")?;

    info!(
        "produced {} takes across {} speakers (grand total {})",
        result.takes.len(),
        result.summary.per_speaker.len(),
        result.summary.grand_total
    );

    write_workbook(&result.takes, &result.summary, &output)
        .context("failed to write output workbook")?;
    info!("output written to {:?}", output);

    if let Some(transcript_path) = transcript {
        let file_stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("transcript");
        write_transcript(&result.takes, file_stem, &transcript_path)
            .context("failed to write transcript")?;
        info!("transcript written to {:?}", transcript_path);
    }

    Ok(())
}

fn analyze_command(input: PathBuf, include_speaker: Vec<String>) -> Result<()> {
    info!("loading script from {:?}", input);
    let rows = read_rows(&input).context("failed to read input spreadsheet")?;

    let filter = (!include_speaker.is_empty()).then_some(include_speaker.as_slice());
    let config = TakeConfig::default();
    let cancel = CancellationToken::new();

    let result = run_pipeline(rows, filter, &config, &cancel)
        .context("analysis was cancelled")?;

    println!("Scenes/takes: {}", result.takes.len());
    println!("{:<20} {:>10}", "SPEAKER", "TOTAL_TAKES");
    for (speaker, count) in &result.summary.per_speaker {
        println!("{speaker:<20} {count:>10}");
    }
    println!("{:<20} {:>10}", "TOTAL", result.summary.grand_total);

    Ok(())
}
