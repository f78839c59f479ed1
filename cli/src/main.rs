mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapdoc-diff")]
#[command(about = "Compare map document snapshots and plan data source changes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two snapshot files")]
    Diff {
        #[arg(help = "Path to the old/base snapshot")]
        old: String,
        #[arg(help = "Path to the new/changed snapshot")]
        new: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, help = "Do not correlate layers on id alone")]
        no_id_matching: bool,
        #[arg(long, help = "Report matched-but-unchanged layers too")]
        include_unchanged: bool,
        #[arg(long, short, help = "Quiet mode: only show summary")]
        quiet: bool,
        #[arg(long, short, help = "Verbose mode: show correlation details")]
        verbose: bool,
    },
    #[command(about = "Show information about a snapshot")]
    Info {
        #[arg(help = "Path to the snapshot")]
        path: String,
    },
    #[command(about = "Plan data source replacements from templates")]
    Plan {
        #[arg(help = "Path to the snapshot")]
        snapshot: String,
        #[arg(help = "Path to the template list (JSON array)")]
        templates: String,
        #[arg(long, help = "Fail when any layer or table matches no template")]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            no_id_matching,
            include_unchanged,
            quiet,
            verbose,
        } => commands::diff::run(
            &old,
            &new,
            format,
            no_id_matching,
            include_unchanged,
            quiet,
            verbose,
        ),
        Commands::Info { path } => commands::info::run(&path),
        Commands::Plan {
            snapshot,
            templates,
            strict,
        } => commands::plan::run(&snapshot, &templates, strict),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
