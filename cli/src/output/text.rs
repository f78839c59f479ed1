use crate::commands::diff::Verbosity;
use anyhow::Result;
use mapdoc_diff::{CompareReport, FrameChange, LayerChange, UpdatedLayer};
use std::io::Write;

pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &CompareReport,
    old_path: &str,
    new_path: &str,
    verbosity: Verbosity,
) -> Result<()> {
    if !report.has_changes() {
        writeln!(w, "No differences found.")?;
        write_summary(w, report, old_path, new_path, verbosity)?;
        return Ok(());
    }

    if !report.data_frames.is_empty() && verbosity != Verbosity::Quiet {
        writeln!(w, "Data frames:")?;
        for change in &report.data_frames {
            writeln!(w, "  {}", render_frame_change(change))?;
        }
        writeln!(w)?;
    }

    if !report.layers.is_empty() && verbosity != Verbosity::Quiet {
        writeln!(w, "Layers:")?;
        for layer in &report.layers.added {
            writeln!(w, "  \"{}\": ADDED", layer.name)?;
        }
        for layer in &report.layers.removed {
            writeln!(w, "  \"{}\": REMOVED", layer.name)?;
        }
        for updated in &report.layers.updated {
            write_updated_layer(w, updated, verbosity)?;
        }
        writeln!(w)?;
    }

    write_summary(w, report, old_path, new_path, verbosity)?;

    Ok(())
}

fn write_updated_layer<W: Write>(
    w: &mut W,
    updated: &UpdatedLayer,
    verbosity: Verbosity,
) -> Result<()> {
    if verbosity == Verbosity::Verbose {
        writeln!(
            w,
            "  \"{}\": UPDATED ({})",
            updated.layer.name,
            updated.matched_by.description()
        )?;
    } else {
        writeln!(w, "  \"{}\": UPDATED", updated.layer.name)?;
    }
    for change in &updated.changes {
        writeln!(w, "    {}", render_layer_change(change))?;
    }
    Ok(())
}

fn render_frame_change(change: &FrameChange) -> String {
    match change {
        FrameChange::MapCountChanged { was, now } => {
            format!("map count changed: {} -> {}", was, now)
        }
        FrameChange::CoordinateSystemCodeChanged { frame, was, now } => format!(
            "map {}: coordinate system code changed: {} -> {}",
            frame,
            render_opt_display(was),
            render_opt_display(now)
        ),
        FrameChange::CoordinateSystemTypeChanged { frame, was, now } => format!(
            "map {}: coordinate system type changed: {} -> {}",
            frame,
            render_opt_str(was.as_deref()),
            render_opt_str(now.as_deref())
        ),
        FrameChange::CoordinateSystemNameChanged { frame, was, now } => format!(
            "map {}: coordinate system name changed: {} -> {}",
            frame,
            render_opt_str(was.as_deref()),
            render_opt_str(now.as_deref())
        ),
        other => format!("{:?}", other),
    }
}

fn render_layer_change(change: &LayerChange) -> String {
    match change {
        LayerChange::IdChanged { was, now } => format!(
            "id: {} -> {}",
            render_opt_display(was),
            render_opt_display(now)
        ),
        LayerChange::NameChanged { was, now } => format!(
            "name: {} -> {}",
            render_opt_str(was.as_deref()),
            render_opt_str(now.as_deref())
        ),
        LayerChange::VisibilityChanged { was, now } => format!(
            "visible: {} -> {}",
            render_opt_display(was),
            render_opt_display(now)
        ),
        LayerChange::DatasourceChanged { property, was, now } => format!(
            "datasource ({:?}): {} -> {}",
            property,
            render_opt_str(was.as_deref()),
            render_opt_str(now.as_deref())
        ),
        LayerChange::DefinitionQueryChanged { was, now } => format!(
            "definition query: {} -> {}",
            render_opt_str(was.as_deref()),
            render_opt_str(now.as_deref())
        ),
        LayerChange::FieldsChanged { was, now } => {
            let was_count = was.as_ref().map(|f| f.len());
            let now_count = now.as_ref().map(|f| f.len());
            match (was_count, now_count) {
                (Some(w), Some(n)) => format!("fields: {} only before, {} only after", w, n),
                (Some(_), None) => "fields: no longer reported".to_string(),
                (None, Some(_)) => "fields: newly reported".to_string(),
                (None, None) => "fields: unchanged".to_string(),
            }
        }
        other => format!("{:?}", other),
    }
}

fn render_opt_display<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<absent>".to_string(),
    }
}

fn render_opt_str(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("\"{}\"", s),
        None => "<absent>".to_string(),
    }
}

fn write_summary<W: Write>(
    w: &mut W,
    report: &CompareReport,
    old_path: &str,
    new_path: &str,
    verbosity: Verbosity,
) -> Result<()> {
    if verbosity == Verbosity::Verbose {
        writeln!(w, "Compared {} -> {}", old_path, new_path)?;
    }
    writeln!(
        w,
        "Summary: {} frame change(s), {} added, {} updated, {} removed",
        report.data_frames.len(),
        report.layers.added.len(),
        report.layers.updated.len(),
        report.layers.removed.len()
    )?;
    if !report.complete {
        writeln!(w, "Note: comparison incomplete; see warnings.")?;
    }
    Ok(())
}
