//! Data-source template matching over snapshots.
//!
//! A [`DataSourceTemplate`] pairs a set of match criteria with a replacement
//! connection payload. Planning walks a snapshot positionally and, for each
//! layer/table record, picks the first template (declaration order) whose
//! criteria are a subset of the record's attributes. The output replacement
//! list has exactly the snapshot's shape, ready for the bulk rewriter.
//!
//! Subset testing works over a frozen canonical form: records and criteria
//! values collapse into hashable, ordered values so nested connection
//! properties compare structurally.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::NoMatchBehavior;
use crate::document::DocumentSnapshot;
use crate::error_codes;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("[MAPDIFF_TMPL_001] no data source template matches '{name}'")]
    NoMatchingTemplate { name: String },

    #[error("[MAPDIFF_TMPL_002] could not canonicalize record '{name}': {message}")]
    Canonicalize { name: String, message: String },
}

impl TemplateError {
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::NoMatchingTemplate { .. } => error_codes::TEMPLATE_NO_MATCH,
            TemplateError::Canonicalize { .. } => error_codes::TEMPLATE_CANONICALIZE,
        }
    }
}

/// One replacement template: criteria to match, payload to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceTemplate {
    /// Attribute/value pairs that must all be present on a record.
    pub match_criteria: serde_json::Map<String, Value>,
    /// Connection payload handed to the rewriter for matching records.
    pub data_source: Value,
}

/// Replacement payloads for one map, positionally aligned with the map's
/// layer and table-view lists. `None` slots (group placeholders or unmatched
/// records) are skipped by the rewriter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapReplacement {
    pub layers: Vec<Option<Value>>,
    pub table_views: Vec<Option<Value>>,
}

/// Plan replacements for every layer and table view of a snapshot.
pub fn create_replacement_list(
    snapshot: &DocumentSnapshot,
    templates: &[DataSourceTemplate],
    on_no_match: NoMatchBehavior,
) -> Result<Vec<MapReplacement>, TemplateError> {
    let frozen_templates: Vec<(BTreeSet<(String, Frozen)>, &Value)> = templates
        .iter()
        .map(|template| {
            let criteria = template
                .match_criteria
                .iter()
                .map(|(key, value)| (key.clone(), freeze(value)))
                .collect();
            (criteria, &template.data_source)
        })
        .collect();

    let mut replacements = Vec::with_capacity(snapshot.maps.len());

    for map in &snapshot.maps {
        let mut layers = Vec::with_capacity(map.layers.len());
        for layer in &map.layers {
            match layer {
                Some(record) => {
                    let entries = freeze_record(&record.name, record)?;
                    layers.push(match_record(&record.name, &entries, &frozen_templates, on_no_match)?);
                }
                // Group placeholder: nothing to rewrite.
                None => layers.push(None),
            }
        }

        let mut table_views = Vec::with_capacity(map.table_views.len());
        for table in &map.table_views {
            let entries = freeze_record(&table.name, table)?;
            table_views.push(match_record(&table.name, &entries, &frozen_templates, on_no_match)?);
        }

        replacements.push(MapReplacement {
            layers,
            table_views,
        });
    }

    Ok(replacements)
}

fn match_record(
    name: &str,
    entries: &BTreeSet<(String, Frozen)>,
    templates: &[(BTreeSet<(String, Frozen)>, &Value)],
    on_no_match: NoMatchBehavior,
) -> Result<Option<Value>, TemplateError> {
    for (criteria, data_source) in templates {
        if criteria.is_subset(entries) {
            debug!(record = name, "data source template matched");
            return Ok(Some((*data_source).clone()));
        }
    }

    match on_no_match {
        NoMatchBehavior::SkipUnmatched => Ok(None),
        NoMatchBehavior::Fail => Err(TemplateError::NoMatchingTemplate {
            name: name.to_string(),
        }),
    }
}

fn freeze_record<T: Serialize>(
    name: &str,
    record: &T,
) -> Result<BTreeSet<(String, Frozen)>, TemplateError> {
    let value = serde_json::to_value(record).map_err(|e| TemplateError::Canonicalize {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), freeze(value)))
            .collect()),
        _ => Ok(BTreeSet::new()),
    }
}

/// Canonical, hashable, ordered form of a JSON value. Mappings become ordered
/// sets of key/frozen-value pairs, sequences become frozen tuples, floats
/// freeze by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Frozen {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Text(String),
    Seq(Vec<Frozen>),
    Map(BTreeSet<(String, Frozen)>),
}

pub(crate) fn freeze(value: &Value) -> Frozen {
    match value {
        Value::Null => Frozen::Null,
        Value::Bool(b) => Frozen::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Frozen::Int(i)
            } else if let Some(u) = n.as_u64() {
                Frozen::UInt(u)
            } else {
                Frozen::Float(n.as_f64().unwrap_or(f64::NAN).to_bits())
            }
        }
        Value::String(s) => Frozen::Text(s.clone()),
        Value::Array(items) => Frozen::Seq(items.iter().map(freeze).collect()),
        Value::Object(map) => Frozen::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), freeze(value)))
                .collect(),
        ),
    }
}
