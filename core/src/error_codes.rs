//! Stable error codes embedded in error messages and exposed via `code()`.

pub(crate) const SOURCE_DESCRIBE_FAILED: &str = "MAPDIFF_SRC_001";
pub(crate) const SOURCE_UPDATE_FAILED: &str = "MAPDIFF_SRC_002";

pub(crate) const TEMPLATE_NO_MATCH: &str = "MAPDIFF_TMPL_001";
pub(crate) const TEMPLATE_CANONICALIZE: &str = "MAPDIFF_TMPL_002";

pub(crate) const REWRITE_MAP_COUNT: &str = "MAPDIFF_RW_001";
pub(crate) const REWRITE_LENGTH_MISMATCH: &str = "MAPDIFF_RW_002";
pub(crate) const REWRITE_AGGREGATE: &str = "MAPDIFF_RW_003";
