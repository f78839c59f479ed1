//! Configuration for snapshot comparison and template matching.

use serde::{Deserialize, Serialize};

/// What the template matcher does when a record matches no template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchBehavior {
    /// Leave the record's replacement slot empty.
    SkipUnmatched,
    /// Fail the whole planning call.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Allow correlating layers on `id` alone (rule 4). Only sound when the
    /// host document pins layer ids across edits; left enabled by default to
    /// match historical behavior.
    pub trust_layer_ids: bool,
    /// Report matched-and-identical layers in `updated` with an empty change
    /// list instead of suppressing them.
    pub include_unchanged_layers: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            trust_layer_ids: true,
            include_unchanged_layers: false,
        }
    }
}
