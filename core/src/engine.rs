//! Snapshot comparison engine.
//!
//! Correlating layers between two document versions is the hard part: layer
//! `id`, `name` and `datasetName` may each change independently between
//! edits, so no single key is trustworthy. The engine runs a process of
//! elimination over a fixed rule table ordered from most to least specific;
//! the first rule that holds on an unclaimed before/after pair wins, and both
//! sides leave the candidate pool.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::CompareConfig;
use crate::diff::{CompareReport, FrameChange, LayerDiff, MatchKind, UpdatedLayer};
use crate::document::{DocumentSnapshot, LayerRecord};
use crate::layer_diff::diff_layer_pair;

/// One correlation rule: which keys must agree for the rule to claim a pair.
struct MatchRule {
    kind: MatchKind,
    same_id: bool,
    same_name: bool,
    same_dataset: bool,
    /// Suppress the pair from `updated` when its field diff is empty.
    ignore_if_unchanged: bool,
}

/// Ordered most specific first. Rule order is the tie-break for a pair that
/// satisfies several rules; before-list order is the tie-break between
/// equally specific candidates.
const MATCH_RULES: [MatchRule; 6] = [
    MatchRule {
        kind: MatchKind::Identical,
        same_id: true,
        same_name: true,
        same_dataset: true,
        ignore_if_unchanged: true,
    },
    MatchRule {
        kind: MatchKind::SameIdName,
        same_id: true,
        same_name: true,
        same_dataset: false,
        ignore_if_unchanged: false,
    },
    MatchRule {
        kind: MatchKind::SameIdDataset,
        same_id: true,
        same_name: false,
        same_dataset: true,
        ignore_if_unchanged: false,
    },
    MatchRule {
        kind: MatchKind::SameId,
        same_id: true,
        same_name: false,
        same_dataset: false,
        ignore_if_unchanged: false,
    },
    MatchRule {
        kind: MatchKind::SameNameDataset,
        same_id: false,
        same_name: true,
        same_dataset: true,
        ignore_if_unchanged: false,
    },
    MatchRule {
        kind: MatchKind::SameName,
        same_id: false,
        same_name: true,
        same_dataset: false,
        ignore_if_unchanged: false,
    },
];

/// Key equality is false whenever the key is absent on either side.
fn eq_key<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

fn rule_matches(rule: &MatchRule, a: &LayerRecord, b: &LayerRecord) -> bool {
    (!rule.same_id || eq_key(&a.id, &b.id))
        && (!rule.same_name || a.name == b.name)
        && (!rule.same_dataset || eq_key(&a.dataset_name, &b.dataset_name))
}

/// Compare two document snapshots.
///
/// Returns the map-level diff and the added/updated/removed layer partition.
/// Never fails: degenerate input (duplicate layer names within one snapshot)
/// is reported through `warnings` and `complete = false` while the rest of
/// the comparison proceeds.
pub fn compare(
    before: &DocumentSnapshot,
    after: &DocumentSnapshot,
    config: &CompareConfig,
) -> CompareReport {
    let mut report = CompareReport::new();

    report.data_frames = diff_data_frames(before, after);

    let before_pool: Vec<&LayerRecord> = before.layer_pool().collect();
    let after_pool: Vec<&LayerRecord> = after.layer_pool().collect();

    for warning in duplicate_name_warnings(&before_pool, "before")
        .into_iter()
        .chain(duplicate_name_warnings(&after_pool, "after"))
    {
        report.add_warning(warning);
    }

    report.layers = correlate_layers(&before_pool, &after_pool, config);

    debug!(
        added = report.layers.added.len(),
        updated = report.layers.updated.len(),
        removed = report.layers.removed.len(),
        frame_changes = report.data_frames.len(),
        "snapshot comparison finished"
    );

    report
}

/// Coarse, index-aligned map-level diff. Frames beyond the shorter list are
/// not compared pairwise; the count mismatch entry covers them.
fn diff_data_frames(before: &DocumentSnapshot, after: &DocumentSnapshot) -> Vec<FrameChange> {
    let mut changes = Vec::new();

    let was = before.maps.len();
    let now = after.maps.len();
    if now == 0 || was != now {
        changes.push(FrameChange::MapCountChanged { was, now });
    }

    for (frame, (a, b)) in before.maps.iter().zip(after.maps.iter()).enumerate() {
        let sr_a = a.spatial_reference.as_ref();
        let sr_b = b.spatial_reference.as_ref();

        let code_was = sr_a.and_then(|sr| sr.factory_code);
        let code_now = sr_b.and_then(|sr| sr.factory_code);
        if code_was != code_now {
            changes.push(FrameChange::CoordinateSystemCodeChanged {
                frame,
                was: code_was,
                now: code_now,
            });
        }

        let kind_was = sr_a.and_then(|sr| sr.kind.clone());
        let kind_now = sr_b.and_then(|sr| sr.kind.clone());
        if kind_was != kind_now {
            changes.push(FrameChange::CoordinateSystemTypeChanged {
                frame,
                was: kind_was,
                now: kind_now,
            });
        }

        let name_was = sr_a.and_then(|sr| sr.name.clone());
        let name_now = sr_b.and_then(|sr| sr.name.clone());
        if name_was != name_now {
            changes.push(FrameChange::CoordinateSystemNameChanged {
                frame,
                was: name_was,
                now: name_now,
            });
        }
    }

    changes
}

fn correlate_layers(
    before: &[&LayerRecord],
    after: &[&LayerRecord],
    config: &CompareConfig,
) -> LayerDiff {
    let mut diff = LayerDiff::default();

    // Consumed before-side candidates, keyed by name (the snapshot
    // invariant). Checked uniformly for every rule so one layer is never
    // claimed twice. The after side needs no set: each after-layer is
    // visited exactly once.
    let mut resolved_before: FxHashSet<&str> = FxHashSet::default();

    for b in after {
        let mut matched = false;

        'candidates: for a in before {
            if resolved_before.contains(a.name.as_str()) {
                continue;
            }

            for rule in &MATCH_RULES {
                if rule.kind == MatchKind::SameId && !config.trust_layer_ids {
                    continue;
                }
                if !rule_matches(rule, a, b) {
                    continue;
                }

                resolved_before.insert(a.name.as_str());

                let changes = diff_layer_pair(a, b);
                debug!(
                    layer = %b.name,
                    rule = rule.kind.description(),
                    changes = changes.len(),
                    "correlated layer pair"
                );

                if !rule.ignore_if_unchanged
                    || !changes.is_empty()
                    || config.include_unchanged_layers
                {
                    diff.updated.push(UpdatedLayer {
                        layer: (*b).clone(),
                        matched_by: rule.kind,
                        changes,
                    });
                }

                matched = true;
                break 'candidates;
            }
        }

        if !matched {
            diff.added.push((*b).clone());
        }
    }

    for a in before {
        if !resolved_before.contains(a.name.as_str()) {
            diff.removed.push((*a).clone());
        }
    }

    diff
}

fn duplicate_name_warnings(pool: &[&LayerRecord], side: &str) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut warned: FxHashSet<&str> = FxHashSet::default();
    let mut warnings = Vec::new();

    for layer in pool {
        let name = layer.name.as_str();
        if !seen.insert(name) && warned.insert(name) {
            warnings.push(format!(
                "duplicate layer name '{name}' in {side} snapshot; correlation for it is unreliable"
            ));
        }
    }

    warnings
}
