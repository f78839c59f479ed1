use anyhow::Result;
use mapdoc_diff::{CompareReport, serialize_compare_report};
use std::io::Write;

pub fn write_json_report<W: Write>(w: &mut W, report: &CompareReport) -> Result<()> {
    writeln!(w, "{}", serialize_compare_report(report)?)?;
    Ok(())
}
