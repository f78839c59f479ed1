//! JSON serialization helpers for reports and replacement lists.

use crate::diff::CompareReport;
use crate::replacement::MapReplacement;

pub fn serialize_compare_report(report: &CompareReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn serialize_compare_report_pretty(report: &CompareReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn serialize_replacement_list(list: &[MapReplacement]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_serializes_with_schema_version() {
        let report = CompareReport::new();
        let json = serialize_compare_report(&report).expect("serialize report");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
        assert_eq!(value["version"], "1");
        assert_eq!(value["complete"], true);
        assert!(value["dataFrames"].as_array().expect("array").is_empty());
    }
}
