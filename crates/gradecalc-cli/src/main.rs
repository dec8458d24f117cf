//! gradecalc CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "gradecalc", version, about = "Weighted university grade calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show averages, progress and the final grade
    Summary {
        /// Snapshot JSON file (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Desired final grade, as a number or band ("65", "2:1")
        #[arg(long)]
        desired: Option<String>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show what a module's pending work needs for a desired grade
    Targets {
        /// Snapshot JSON file (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Year id
        #[arg(long)]
        year: String,

        /// Module id
        #[arg(long)]
        module: String,

        /// Desired final grade, as a number or band ("65", "2:1")
        #[arg(long)]
        desired: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Record a score for an assignment or one of its subtasks
    Grade {
        /// Snapshot JSON file (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Year id
        #[arg(long)]
        year: String,

        /// Module id
        #[arg(long)]
        module: String,

        /// Assignment id
        #[arg(long)]
        assignment: String,

        /// Subtask id (grades the subtask instead of the assignment)
        #[arg(long)]
        sub_task: Option<String>,

        /// Score out of 100
        #[arg(long)]
        score: f64,

        /// Record the score without marking the work done
        #[arg(long)]
        pending: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a snapshot for weight and structure problems
    Validate {
        /// Snapshot JSON file (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export a snapshot to a dated JSON file
    Export {
        /// Snapshot JSON file (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Output file (default: grades-<mode>-<date>.json in the export dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Drop scores, completion flags and the desired grade
        #[arg(long)]
        structure_only: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replace the snapshot with an exported JSON file
    Import {
        /// Snapshot JSON file to replace (default: from config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// JSON file to import
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample snapshot
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradecalc=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary {
            snapshot,
            desired,
            format,
            config,
        } => commands::summary::execute(snapshot, desired, format, config),
        Commands::Targets {
            snapshot,
            year,
            module,
            desired,
            config,
        } => commands::targets::execute(snapshot, year, module, desired, config),
        Commands::Grade {
            snapshot,
            year,
            module,
            assignment,
            sub_task,
            score,
            pending,
            config,
        } => commands::grade::execute(
            snapshot, year, module, assignment, sub_task, score, pending, config,
        ),
        Commands::Validate { snapshot, config } => commands::validate::execute(snapshot, config),
        Commands::Export {
            snapshot,
            output,
            structure_only,
            config,
        } => commands::export::execute(snapshot, output, structure_only, config),
        Commands::Import {
            snapshot,
            input,
            config,
        } => commands::import::execute(snapshot, input, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
