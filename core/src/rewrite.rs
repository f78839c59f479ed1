//! Bulk data-source rewriting over live documents.
//!
//! Rewriting is positional: the caller supplies one [`MapReplacement`] per
//! map, with layer/table lists of exactly the document's shape. Shape
//! violations are fatal and raised before the offending list is touched.
//! Individual update failures are not: they are collected and raised once at
//! the end as one aggregate error, so a single bad layer cannot strand the
//! rest of the document half-rewritten.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::error_codes;
use crate::replacement::MapReplacement;
use crate::source::SourceError;

/// A mutable layer or table view whose connection can be rewritten.
pub trait ConnectionTarget {
    fn name(&self) -> String;

    fn update_connection(&mut self, new_props: &Value) -> Result<(), SourceError>;

    /// Whether the target's data source resolves after the update.
    fn is_broken(&self) -> bool;
}

/// One live map whose layers and table views can be rewritten.
pub trait MapTarget {
    type Layer: ConnectionTarget;
    type Table: ConnectionTarget;

    fn layers_mut(&mut self) -> Vec<&mut Self::Layer>;
    fn table_views_mut(&mut self) -> Vec<&mut Self::Table>;
}

/// A live document whose maps can be rewritten.
pub trait DocumentTarget {
    type Map: MapTarget;

    fn maps_mut(&mut self) -> Vec<&mut Self::Map>;
}

/// One recovered per-target failure inside a bulk rewrite.
#[derive(Debug, Error)]
pub enum UpdateFailure {
    #[error("connection update failed for '{layer}': {source}")]
    UpdateRejected {
        layer: String,
        source: SourceError,
    },

    #[error("'{layer}' reports a broken data source after its connection update")]
    BrokenAfterUpdate { layer: String },
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewriteError {
    #[error("[MAPDIFF_RW_001] document has {targets} maps but the replacement list has {replacements}")]
    MapCountMismatch { targets: usize, replacements: usize },

    #[error("[MAPDIFF_RW_002] map {map_index}: {kind} count {targets} does not match replacement count {replacements}")]
    LengthMismatch {
        map_index: usize,
        kind: &'static str,
        targets: usize,
        replacements: usize,
    },

    #[error("[MAPDIFF_RW_003] {} data source update(s) failed", failures.len())]
    Aggregate { failures: Vec<UpdateFailure> },
}

impl RewriteError {
    pub fn code(&self) -> &'static str {
        match self {
            RewriteError::MapCountMismatch { .. } => error_codes::REWRITE_MAP_COUNT,
            RewriteError::LengthMismatch { .. } => error_codes::REWRITE_LENGTH_MISMATCH,
            RewriteError::Aggregate { .. } => error_codes::REWRITE_AGGREGATE,
        }
    }
}

/// Apply a replacement list to a live document.
pub fn apply_replacements<D: DocumentTarget>(
    document: &mut D,
    replacements: &[MapReplacement],
) -> Result<(), RewriteError> {
    let mut maps = document.maps_mut();

    if maps.len() != replacements.len() {
        return Err(RewriteError::MapCountMismatch {
            targets: maps.len(),
            replacements: replacements.len(),
        });
    }

    let mut failures = Vec::new();

    for (map_index, (map, replacement)) in maps.iter_mut().zip(replacements).enumerate() {
        apply_to_targets(
            map.layers_mut(),
            &replacement.layers,
            "layer",
            map_index,
            &mut failures,
        )?;
        apply_to_targets(
            map.table_views_mut(),
            &replacement.table_views,
            "table view",
            map_index,
            &mut failures,
        )?;
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(RewriteError::Aggregate { failures })
    }
}

fn apply_to_targets<T: ConnectionTarget>(
    mut targets: Vec<&mut T>,
    replacements: &[Option<Value>],
    kind: &'static str,
    map_index: usize,
    failures: &mut Vec<UpdateFailure>,
) -> Result<(), RewriteError> {
    // Shape check first: nothing in this list is mutated on mismatch.
    if targets.len() != replacements.len() {
        return Err(RewriteError::LengthMismatch {
            map_index,
            kind,
            targets: targets.len(),
            replacements: replacements.len(),
        });
    }

    for (target, replacement) in targets.iter_mut().zip(replacements) {
        let Some(new_props) = replacement else {
            continue;
        };

        let name = target.name();
        debug!(target = %name, kind, "updating connection properties");

        if let Err(source) = target.update_connection(new_props) {
            failures.push(UpdateFailure::UpdateRejected {
                layer: name,
                source,
            });
            continue;
        }

        if target.is_broken() {
            failures.push(UpdateFailure::BrokenAfterUpdate { layer: name });
        }
    }

    Ok(())
}
