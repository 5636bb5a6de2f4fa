//! Field presence diffing for submitted JSON bodies
//!
//! The validation protocol checks which of an operation's expected fields a
//! submission actually carries before any typed deserialization happens, so
//! failure envelopes can name the absent fields exactly.

use serde_json::{Map, Value};

/// Which of `expected` are absent from `submitted`, in `expected` order.
///
/// `None` means presence cannot be evaluated at all (no object was
/// submitted), which is distinct from `Some(vec![])` (nothing missing).
pub fn missing_fields(
    submitted: Option<&Map<String, Value>>,
    expected: &[&str],
) -> Option<Vec<String>> {
    let submitted = submitted?;
    Some(
        expected
            .iter()
            .filter(|field| !submitted.contains_key(**field))
            .map(|field| (*field).to_string())
            .collect(),
    )
}

/// Restrict a submission to the declared allowed field set.
///
/// Undeclared keys are dropped; declared keys keep their submitted values,
/// including explicit nulls.
pub fn pick(source: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            source
                .get(*key)
                .map(|value| ((*key).to_string(), value.clone()))
        })
        .collect()
}
