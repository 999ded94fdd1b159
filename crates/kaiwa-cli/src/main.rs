//! kaiwa CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kaiwa", version, about = "Japanese conversation proficiency scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a conversation transcript
    Analyze {
        /// Path to a .toml transcript or directory
        #[arg(long)]
        transcript: PathBuf,

        /// Target JLPT level override (N5-N1)
        #[arg(long)]
        target_level: Option<String>,

        /// Directory for JSON reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Estimate the JLPT level of a text
    Estimate {
        /// Text to estimate
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the text
        #[arg(long)]
        file: Option<PathBuf>,

        /// Target JLPT level to check against (N5-N1)
        #[arg(long)]
        target_level: Option<String>,
    },

    /// Validate transcript TOML files
    Validate {
        /// Path to a transcript file or directory
        #[arg(long)]
        transcript: PathBuf,
    },

    /// Compare two evaluation reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Points of movement that count as a change
        #[arg(long, default_value = "5")]
        threshold: u32,

        /// Exit code 1 if any skill regressed
        #[arg(long)]
        fail_on_regression: bool,
    },

    /// Hold a practice conversation and score it afterwards
    Chat {
        /// Conversation topic
        #[arg(long, default_value = "日常生活")]
        topic: String,

        /// JLPT level to practice at (N5-N1)
        #[arg(long, default_value = "N5")]
        level: String,

        /// Provider name from the config
        #[arg(long)]
        provider: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Save the transcript here when the conversation ends
        #[arg(long)]
        save: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example transcript
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kaiwa=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            transcript,
            target_level,
            output,
            format,
            config,
        } => commands::analyze::execute(transcript, target_level, output, format, config),
        Commands::Estimate {
            text,
            file,
            target_level,
        } => commands::estimate::execute(text, file, target_level),
        Commands::Validate { transcript } => commands::validate::execute(transcript),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression),
        Commands::Chat {
            topic,
            level,
            provider,
            model,
            save,
            config,
        } => commands::chat::execute(topic, level, provider, model, save, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
