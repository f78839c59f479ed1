use crate::commands::load_snapshot;
use anyhow::{Context, Result};
use mapdoc_diff::{
    DataSourceTemplate, NoMatchBehavior, create_replacement_list, serialize_replacement_list,
};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

pub fn run(snapshot_path: &str, templates_path: &str, strict: bool) -> Result<ExitCode> {
    let snapshot = load_snapshot(snapshot_path)?;

    let raw = fs::read_to_string(templates_path)
        .with_context(|| format!("Failed to read templates: {}", templates_path))?;
    let templates: Vec<DataSourceTemplate> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse templates: {}", templates_path))?;

    let on_no_match = if strict {
        NoMatchBehavior::Fail
    } else {
        NoMatchBehavior::SkipUnmatched
    };

    let plan = create_replacement_list(&snapshot, &templates, on_no_match)
        .context("Replacement planning failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", serialize_replacement_list(&plan)?)?;

    Ok(ExitCode::from(0))
}
