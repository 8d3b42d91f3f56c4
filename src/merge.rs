//! Deep merge for translation objects
//!
//! Combines JSON objects right-biased: nested objects accumulate keys from
//! every source, while scalars, arrays and nulls from a later source replace
//! whatever the target held. Arrays are overwritten wholesale, never merged
//! element-wise.

use serde_json::{Map, Value};

/// Merge `source` into `target`.
///
/// For every key in `source`:
/// - a nested object is merged recursively; if the target holds a non-object
///   at that key (or nothing), the slot is reset to an empty object first
/// - any other value replaces the target's value for that key
///
/// The result is associative on nested-object keys but not commutative:
/// later sources win on any non-object key, independently at every nesting
/// level.
pub fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match value {
            Value::Object(nested) => {
                let slot = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(existing) = slot {
                    deep_merge(existing, nested);
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}
