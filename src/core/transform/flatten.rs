//! Record flattening
//!
//! Converts one nested search result into a flat key → value(s) mapping:
//!
//! - `id`, `idno` and `table` are copied verbatim
//! - each bundle becomes one field named after its `code` (or `name`), with
//!   the `ca_objects.` prefix removed
//! - null and empty-string values are dropped; a bundle left with no values
//!   is omitted
//! - a single surviving value is stored as a scalar, several as an array in
//!   source order
//!
//! Locales and data types are discarded.

use crate::domain::record::{Bundle, FlatRecord, RawRecord};
use crate::domain::search::OBJECTS_TABLE;
use serde_json::Value;

/// Flatten one raw record
///
/// # Examples
///
/// ```
/// use cafetch::core::transform::flatten::flatten_record;
/// use cafetch::domain::RawRecord;
/// use serde_json::json;
///
/// let raw: RawRecord = serde_json::from_value(json!({
///     "id": 7,
///     "idno": "2001.7",
///     "table": "ca_objects",
///     "bundles": [{
///         "code": "ca_objects.preferred_labels.name",
///         "values": [{"value": "Teapot", "locale": "en_US"}]
///     }]
/// })).unwrap();
///
/// let flat = flatten_record(&raw);
/// assert_eq!(flat.get("preferred_labels.name"), Some(&json!("Teapot")));
/// ```
pub fn flatten_record(raw: &RawRecord) -> FlatRecord {
    let mut flat = FlatRecord::new(raw.id.clone(), raw.idno.clone(), raw.table.clone());

    for bundle in raw.bundles.iter().flatten() {
        if let Some((key, value)) = flatten_bundle(bundle) {
            flat.insert(key, value);
        }
    }

    flat
}

/// Output key and value of a bundle, `None` when it contributes nothing
fn flatten_bundle(bundle: &Bundle) -> Option<(String, Value)> {
    let key = strip_table_prefix(bundle.identifier()?);

    let mut values: Vec<Value> = bundle
        .values
        .iter()
        .flatten()
        .filter_map(|v| v.non_empty().cloned())
        .collect();

    let value = match values.len() {
        0 => return None,
        1 => values.remove(0),
        _ => Value::Array(values),
    };

    Some((key.to_string(), value))
}

/// Remove the leading `ca_objects.` from a bundle identifier
pub fn strip_table_prefix(identifier: &str) -> &str {
    identifier
        .strip_prefix(OBJECTS_TABLE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(identifier)
}
