//! Structural request validation
//!
//! Pure comparator between caller-supplied data and an operation's shape
//! template. Only key structure is checked, recursively: key sets must match
//! exactly at every object level, while scalar values pass untouched. The
//! first divergence fails the whole check; individual mismatches are not
//! collected or reported.

use serde_json::Value;

use crate::types::{Shape, TransactionRequest};

/// Check a top-level transaction payload against an operation template
///
/// Entry point used by the orchestrator before any network call is
/// attempted. Equivalent to [`matches`] with the payload wrapped as an
/// object value.
pub fn follows_format(data: &TransactionRequest, shape: &Shape) -> bool {
    let Shape::Object(fields) = shape else {
        return false;
    };

    if data.len() != fields.len() || !data.keys().all(|key| fields.contains_key(key)) {
        return false;
    }

    data.iter()
        .all(|(key, value)| !is_composite(value) || matches(value, &fields[key]))
}

/// Recursively check one value against its sub-template
///
/// Recursion is driven by the data side: composite values (objects and
/// sequences) are validated against the corresponding template node, while
/// scalar values always pass regardless of the template variant. A composite
/// value under a scalar template fails, as does a sequence under an object
/// template and vice versa. Deterministic for a given `(data, shape)` pair;
/// no I/O, no side effects.
pub fn matches(data: &Value, shape: &Shape) -> bool {
    match data {
        Value::Object(entries) => match shape {
            Shape::Object(fields) => {
                if entries.len() != fields.len()
                    || !entries.keys().all(|key| fields.contains_key(key))
                {
                    return false;
                }

                entries
                    .iter()
                    .all(|(key, value)| !is_composite(value) || matches(value, &fields[key]))
            }
            _ => false,
        },
        Value::Array(items) => match shape {
            Shape::Group(element) => items
                .iter()
                .all(|item| !is_composite(item) || matches(item, element)),
            _ => false,
        },
        // Scalars are never type- or content-checked
        _ => true,
    }
}

fn is_composite(value: &Value) -> bool {
    value.is_object() || value.is_array()
}
