//! Map Document Diff: a library for comparing map-document snapshots.
//!
//! This crate provides functionality for:
//! - Extracting normalized [`DocumentSnapshot`]s from live documents behind
//!   collaborator traits
//! - Correlating layers between two snapshot versions despite unstable keys
//!   and classifying what changed
//! - Matching data-source templates against records and planning positional
//!   replacement lists
//! - Bulk-rewriting data source connections with aggregate failure reporting
//!
//! # Quick Start
//!
//! ```
//! use mapdoc_diff::{compare, CompareConfig, DocumentSnapshot, MapSnapshot};
//!
//! let before = DocumentSnapshot::new(vec![MapSnapshot::default()]);
//! let after = before.clone();
//! let report = compare(&before, &after, &CompareConfig::default());
//!
//! assert!(!report.has_changes());
//! assert!(report.complete);
//! ```

mod config;
mod diff;
mod document;
mod engine;
mod error_codes;
mod extract;
pub(crate) mod hashing;
mod layer_diff;
mod output;
mod replacement;
mod rewrite;
mod source;

pub use config::{CompareConfig, NoMatchBehavior};
pub use diff::{
    CompareReport, DataSourceProperty, FrameChange, LayerChange, LayerDiff, MatchKind,
    UpdatedLayer,
};
pub use document::{
    DocumentSnapshot, FieldInfo, LayerRecord, MapSnapshot, SpatialReference, TableRecord,
};
pub use engine::compare;
pub use extract::{extract_document, extract_layer};
pub use output::json::{
    serialize_compare_report, serialize_compare_report_pretty, serialize_replacement_list,
};
pub use replacement::{DataSourceTemplate, MapReplacement, TemplateError, create_replacement_list};
pub use rewrite::{
    ConnectionTarget, DocumentTarget, MapTarget, RewriteError, UpdateFailure, apply_replacements,
};
pub use source::{
    DataDescription, DataType, DocumentSource, LayerSource, MapSource, ServiceProperties,
    SourceError, TableSource,
};
