//! Field-level diff of a correlated layer pair.
//!
//! A fixed, ordered attribute table is tested on every matched pair: `id`,
//! `name`, `visible`, then the five connection attributes that share the
//! `datasource_changed` classification, then `definitionQuery`, then the
//! field set. Scalar attributes differ when both sides carry unequal values
//! or when exactly one side carries the attribute at all; absent-on-both is
//! not a difference.

use rustc_hash::FxHashSet;

use crate::diff::{DataSourceProperty, LayerChange};
use crate::document::{FieldInfo, LayerRecord};
use crate::hashing::field_fingerprint;

pub(crate) fn diff_layer_pair(a: &LayerRecord, b: &LayerRecord) -> Vec<LayerChange> {
    let mut changes = Vec::new();

    push_scalar(&a.id, &b.id, &mut changes, |was, now| {
        LayerChange::IdChanged { was, now }
    });

    let name_a = Some(a.name.clone());
    let name_b = Some(b.name.clone());
    push_scalar(&name_a, &name_b, &mut changes, |was, now| {
        LayerChange::NameChanged { was, now }
    });

    push_scalar(&a.visible, &b.visible, &mut changes, |was, now| {
        LayerChange::VisibilityChanged { was, now }
    });

    for (property, was, now) in [
        (
            DataSourceProperty::WorkspacePath,
            &a.workspace_path,
            &b.workspace_path,
        ),
        (
            DataSourceProperty::DatasetName,
            &a.dataset_name,
            &b.dataset_name,
        ),
        (DataSourceProperty::Database, &a.database, &b.database),
        (DataSourceProperty::Server, &a.server, &b.server),
        (DataSourceProperty::Service, &a.service, &b.service),
    ] {
        push_scalar(was, now, &mut changes, |was, now| {
            LayerChange::DatasourceChanged { property, was, now }
        });
    }

    push_scalar(
        &a.definition_query,
        &b.definition_query,
        &mut changes,
        |was, now| LayerChange::DefinitionQueryChanged { was, now },
    );

    match (&a.fields, &b.fields) {
        (Some(was), Some(now)) => {
            if let Some(change) = diff_field_sets(was, now) {
                changes.push(change);
            }
        }
        (Some(was), None) => changes.push(LayerChange::FieldsChanged {
            was: Some(was.clone()),
            now: None,
        }),
        (None, Some(now)) => changes.push(LayerChange::FieldsChanged {
            was: None,
            now: Some(now.clone()),
        }),
        (None, None) => {}
    }

    changes
}

fn push_scalar<T: Clone + PartialEq>(
    was: &Option<T>,
    now: &Option<T>,
    out: &mut Vec<LayerChange>,
    make: impl FnOnce(Option<T>, Option<T>) -> LayerChange,
) {
    let differs = match (was, now) {
        (Some(a), Some(b)) => a != b,
        (None, None) => false,
        _ => true,
    };
    if differs {
        out.push(make(was.clone(), now.clone()));
    }
}

/// Unordered set comparison of two field tables. Returns the symmetric
/// difference mapped back to the originating records, in list order.
fn diff_field_sets(was: &[FieldInfo], now: &[FieldInfo]) -> Option<LayerChange> {
    let was_hashes: FxHashSet<u64> = was.iter().map(field_fingerprint).collect();
    let now_hashes: FxHashSet<u64> = now.iter().map(field_fingerprint).collect();

    if was_hashes == now_hashes {
        return None;
    }

    let only_was: Vec<FieldInfo> = was
        .iter()
        .filter(|field| !now_hashes.contains(&field_fingerprint(field)))
        .cloned()
        .collect();
    let only_now: Vec<FieldInfo> = now
        .iter()
        .filter(|field| !was_hashes.contains(&field_fingerprint(field)))
        .cloned()
        .collect();

    Some(LayerChange::FieldsChanged {
        was: Some(only_was),
        now: Some(only_now),
    })
}
