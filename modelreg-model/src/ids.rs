//! Numeric identifiers.
//!
//! The REST surface carries ids and epoch timestamps as decimal strings while
//! both stores key rows by 64-bit integers. Conversion must be exact in both
//! directions: no float detour, no silent truncation.

use crate::{ModelError, ModelResult};

/// Parses a decimal id string into the stores' integer form.
///
/// Leading `+`, surrounding whitespace and values outside `i64` are rejected.
pub fn parse_id(literal: &str) -> ModelResult<i64> {
    if literal.starts_with('+') {
        return Err(invalid(literal, "explicit sign is not allowed"));
    }
    literal
        .parse::<i64>()
        .map_err(|e| invalid(literal, &e.to_string()))
}

/// Parses an optional id, passing absence through.
pub fn parse_optional_id(literal: Option<&str>) -> ModelResult<Option<i64>> {
    literal.map(parse_id).transpose()
}

/// Formats a store id as its REST string form.
#[must_use]
pub fn format_id(id: i64) -> String {
    id.to_string()
}

fn invalid(literal: &str, reason: &str) -> ModelError {
    ModelError::InvalidId {
        literal: literal.to_string(),
        reason: reason.to_string(),
    }
}
