//! Raw and flattened object records
//!
//! [`RawRecord`] mirrors one entry of `data.search.results[0].result` as the
//! CollectiveAccess GraphQL service returns it. [`FlatRecord`] is the
//! denormalized projection written to the output file, one per line.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Bundles requested when the caller does not name any
pub const DEFAULT_BUNDLES: &[&str] = &[
    // Core identification
    "ca_objects.preferred_labels.name",
    "ca_objects.nonpreferred_labels",
    "ca_objects.idno",
    "ca_objects.type_id",
    // Visibility & status
    "ca_objects.access",
    "ca_objects.status",
    // Descriptions
    "ca_objects.description",
    "ca_objects.descriptionSet",
    "ca_objects.internal_notes",
    // Dates
    "ca_objects.object_date",
    "ca_objects.primaryDateSet",
    // Physical attributes
    "ca_objects.dimensions",
    "ca_objects.georeference",
    "ca_objects.geonames",
    // Keywords & subject headings
    "ca_objects.RHS_keywords_list",
    "ca_objects.lcsh_terms",
    // Rights & source
    "ca_objects.rightsSet",
    "ca_objects.sourceSet",
    // Related records
    "ca_entities.preferred_labels.displayname",
    "ca_places.preferred_labels.name",
    "ca_collections.preferred_labels.name",
    "ca_list_items.preferred_labels.name_plural",
    // Media
    "ca_object_representations.media.small.url",
    "ca_object_representations.media.medium.url",
    "ca_object_representations.media.original.url",
    // Links
    "ca_objects.external_link",
];

/// The default bundle list as owned strings
pub fn default_bundles() -> Vec<String> {
    DEFAULT_BUNDLES.iter().map(|b| b.to_string()).collect()
}

/// Parse a comma-separated bundle override; empty input selects the defaults
///
/// ```
/// use cafetch::domain::record::{parse_bundle_list, DEFAULT_BUNDLES};
///
/// assert_eq!(parse_bundle_list("ca_objects.idno, ca_objects.access"),
///            vec!["ca_objects.idno", "ca_objects.access"]);
/// assert_eq!(parse_bundle_list("").len(), DEFAULT_BUNDLES.len());
/// ```
pub fn parse_bundle_list(raw: &str) -> Vec<String> {
    let bundles: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if bundles.is_empty() {
        return default_bundles();
    }
    bundles
}

/// Deserialize an optional field, reading a value of the wrong shape as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One object as returned by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Primary key; the service sends numbers or strings
    #[serde(default)]
    pub id: Value,

    /// Identifier number
    #[serde(default)]
    pub idno: Value,

    /// Table name, normally `ca_objects`
    #[serde(default)]
    pub table: Value,

    /// Requested bundles with their values
    #[serde(default, deserialize_with = "lenient")]
    pub bundles: Option<Vec<Bundle>>,
}

/// A named field group of a record
///
/// Only `code`, `name` and `values` are interpreted; anything else the
/// service sends is carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<String>,

    #[serde(default, rename = "dataType")]
    pub data_type: Option<Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub values: Option<Vec<BundleValue>>,
}

impl Bundle {
    /// `code` if present, otherwise `name`
    pub fn identifier(&self) -> Option<&str> {
        self.code.as_deref().or(self.name.as_deref())
    }
}

/// A single locale-tagged value of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleValue {
    #[serde(default)]
    pub value: Option<Value>,

    #[serde(default)]
    pub locale: Option<Value>,
}

impl BundleValue {
    /// The value unless it is null or the empty string
    pub fn non_empty(&self) -> Option<&Value> {
        match &self.value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(v) => Some(v),
        }
    }
}

/// Flat key→value(s) projection of a [`RawRecord`]
///
/// Serializes as a plain JSON object with keys in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(Map<String, Value>);

impl FlatRecord {
    /// Start a record with the identity fields every record carries
    pub fn new(id: Value, idno: Value, table: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id);
        fields.insert("idno".to_string(), idno);
        fields.insert("table".to_string(), table);
        Self(fields)
    }

    /// Set a field, replacing any earlier value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
