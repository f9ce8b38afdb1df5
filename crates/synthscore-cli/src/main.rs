//! The synthscore command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "synthscore", version, about = "Evaluation report synthesis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an evaluation result into report documents
    Render {
        /// Path to the evaluation result JSON
        #[arg(long)]
        input: PathBuf,

        /// Output directory (defaults to `output_dir` from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: pdf, text, all
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Export timestamp (RFC 3339, defaults to now)
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Print the aggregate summary of an evaluation result
    Summary {
        /// Path to the evaluation result JSON
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate evaluation result JSON files
    Validate {
        /// Path to a result file or directory
        #[arg(long)]
        input: PathBuf,
    },

    /// Print the parent notification payload for an evaluation result
    Notify {
        /// Path to the evaluation result JSON
        #[arg(long)]
        input: PathBuf,

        /// Parent address, overriding `parentEmail` in the result
        #[arg(long)]
        parent_email: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and a sample result
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("synthscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            format,
            config,
            timestamp,
        } => commands::render::execute(input, output, format, config, timestamp),
        Commands::Summary {
            input,
            format,
            config,
        } => commands::summary::execute(input, format, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Notify {
            input,
            parent_email,
            config,
        } => commands::notify::execute(input, parent_email, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
