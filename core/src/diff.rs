//! Change operations and reports for snapshot comparison.
//!
//! This module defines the types used to represent differences between two
//! document snapshots:
//! - [`FrameChange`]: a map-level (data frame) difference
//! - [`LayerChange`]: a single classified difference on a correlated layer
//! - [`CompareReport`]: a versioned collection of both, plus the
//!   added/updated/removed layer partition

use crate::document::{FieldInfo, LayerRecord};
use serde::{Deserialize, Serialize};

/// Which connection attribute a `datasource_changed` entry refers to.
///
/// All five attributes share one change kind; the property tag keeps the
/// entry concrete without splitting the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSourceProperty {
    WorkspacePath,
    DatasetName,
    Database,
    Server,
    Service,
}

/// A map-level difference between two snapshots.
///
/// Frame comparison is strictly index-aligned; no correlation heuristics
/// apply at this level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum FrameChange {
    MapCountChanged {
        was: usize,
        now: usize,
    },
    CoordinateSystemCodeChanged {
        frame: usize,
        was: Option<i64>,
        now: Option<i64>,
    },
    CoordinateSystemTypeChanged {
        frame: usize,
        was: Option<String>,
        now: Option<String>,
    },
    CoordinateSystemNameChanged {
        frame: usize,
        was: Option<String>,
        now: Option<String>,
    },
}

/// A single classified difference on a correlated layer pair.
///
/// Scalar variants carry `was`/`now` as options: `None` means the attribute
/// was absent on that side, and a presence mismatch counts as a difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum LayerChange {
    IdChanged {
        was: Option<i64>,
        now: Option<i64>,
    },
    NameChanged {
        was: Option<String>,
        now: Option<String>,
    },
    VisibilityChanged {
        was: Option<bool>,
        now: Option<bool>,
    },
    DatasourceChanged {
        property: DataSourceProperty,
        was: Option<String>,
        now: Option<String>,
    },
    DefinitionQueryChanged {
        was: Option<String>,
        now: Option<String>,
    },
    /// Field-set difference. `was`/`now` hold the concrete field records
    /// present on only one side; `None` means the whole attribute was absent
    /// on that side.
    FieldsChanged {
        was: Option<Vec<FieldInfo>>,
        now: Option<Vec<FieldInfo>>,
    },
}

/// Which correlation rule claimed a matched layer pair, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Identical,
    SameIdName,
    SameIdDataset,
    SameId,
    SameNameDataset,
    SameName,
}

impl MatchKind {
    pub fn description(self) -> &'static str {
        match self {
            MatchKind::Identical => "same id, name and datasource; unchanged",
            MatchKind::SameIdName => "same id and name; datasource changed",
            MatchKind::SameIdDataset => "same id and datasource; name changed",
            MatchKind::SameId => "same id; assumed valid if fixed layer ids are enabled",
            MatchKind::SameNameDataset => "same name and datasource; id changed",
            MatchKind::SameName => "same name; id/datasource changed",
        }
    }
}

/// A correlated layer pair with at least one difference (or any matched pair
/// when unchanged layers are requested). `layer` is the after-side record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedLayer {
    pub layer: LayerRecord,
    pub matched_by: MatchKind,
    pub changes: Vec<LayerChange>,
}

/// The added/updated/removed partition of the flattened layer pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerDiff {
    pub added: Vec<LayerRecord>,
    pub updated: Vec<UpdatedLayer>,
    pub removed: Vec<LayerRecord>,
}

impl LayerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// A versioned comparison result.
///
/// Comparison is best-effort by contract: degenerate input (duplicate layer
/// names within one snapshot) never fails the call. Instead the affected
/// results stay in the report, `complete` flips to `false` and `warnings`
/// explains what is unreliable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport {
    /// Schema version (currently "1").
    pub version: String,
    pub data_frames: Vec<FrameChange>,
    pub layers: LayerDiff,
    #[serde(default = "default_complete")]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn default_complete() -> bool {
    true
}

impl CompareReport {
    pub const SCHEMA_VERSION: &'static str = "1";

    pub fn new() -> CompareReport {
        CompareReport {
            version: Self::SCHEMA_VERSION.to_string(),
            data_frames: Vec::new(),
            layers: LayerDiff::default(),
            complete: true,
            warnings: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
        self.complete = false;
    }

    pub fn has_changes(&self) -> bool {
        !self.data_frames.is_empty() || !self.layers.is_empty()
    }
}

impl Default for CompareReport {
    fn default() -> Self {
        Self::new()
    }
}
