pub mod diff;
pub mod info;
pub mod plan;

use anyhow::{Context, Result};
use mapdoc_diff::DocumentSnapshot;
use std::fs;

pub fn load_snapshot(path: &str) -> Result<DocumentSnapshot> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read snapshot: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse snapshot: {}", path))
}
