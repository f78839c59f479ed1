use crate::commands::load_snapshot;
use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &str) -> Result<ExitCode> {
    let snapshot = load_snapshot(path)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let filename = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| path.into());

    writeln!(handle, "Snapshot: {}", filename)?;
    writeln!(handle, "Maps: {}", snapshot.maps.len())?;

    for (index, map) in snapshot.maps.iter().enumerate() {
        let layers = map.layers.iter().filter(|l| l.is_some()).count();
        let groups = map.layers.len() - layers;
        writeln!(
            handle,
            "  - map {}: {} layers, {} group placeholders, {} table views",
            index,
            layers,
            groups,
            map.table_views.len()
        )?;
        if let Some(sr) = &map.spatial_reference {
            let name = sr.name.as_deref().unwrap_or("<unnamed>");
            match sr.factory_code {
                Some(code) => writeln!(handle, "    spatial reference: {} ({})", name, code)?,
                None => writeln!(handle, "    spatial reference: {}", name)?,
            }
        }
    }

    Ok(ExitCode::from(0))
}
