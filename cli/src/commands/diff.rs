use crate::OutputFormat;
use crate::commands::load_snapshot;
use crate::output::{json, text};
use anyhow::Result;
use mapdoc_diff::{CompareConfig, CompareReport, compare};
use std::io;
use std::process::ExitCode;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

pub fn run(
    old_path: &str,
    new_path: &str,
    format: OutputFormat,
    no_id_matching: bool,
    include_unchanged: bool,
    quiet: bool,
    verbose: bool,
) -> Result<ExitCode> {
    let verbosity = if quiet {
        Verbosity::Quiet
    } else if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    let config = CompareConfig {
        trust_layer_ids: !no_id_matching,
        include_unchanged_layers: include_unchanged,
    };

    let before = load_snapshot(old_path)?;
    let after = load_snapshot(new_path)?;

    let report = compare(&before, &after, &config);

    print_warnings_to_stderr(&report);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => {
            text::write_text_report(&mut handle, &report, old_path, new_path, verbosity)?;
        }
        OutputFormat::Json => {
            json::write_json_report(&mut handle, &report)?;
        }
    }

    Ok(exit_code_from_report(&report))
}

fn print_warnings_to_stderr(report: &CompareReport) {
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn exit_code_from_report(report: &CompareReport) -> ExitCode {
    if !report.has_changes() && report.complete {
        ExitCode::from(0)
    } else {
        ExitCode::from(1)
    }
}
