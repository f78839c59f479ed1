//! Hash utilities for field-set comparison.
//!
//! Field tables are compared as unordered sets; each field contributes one
//! deterministic fingerprint so set membership survives reordering.

use std::hash::{Hash, Hasher};
use xxhash_rust::xxh64::Xxh64;

use crate::document::FieldInfo;

pub(crate) const XXH64_SEED: u64 = 0;

/// Fingerprint of one field record over `(index, name, visible)`.
pub(crate) fn field_fingerprint(field: &FieldInfo) -> u64 {
    let mut hasher = Xxh64::new(XXH64_SEED);
    field.index.hash(&mut hasher);
    field.name.hash(&mut hasher);
    field.visible.hash(&mut hasher);
    hasher.finish()
}
