//! Decoded value model for the nested-tree (DAG-CBOR) encoding.

use cid::Cid;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::types::LINK_MARKER;

/// A decoded nested-tree value
///
/// Maps are ordered by key, which matches the canonical DAG-CBOR key order
/// and is the iteration order link discovery follows.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<TreeValue>),
    Map(BTreeMap<String, TreeValue>),
    /// An identifier decoded directly by the codec (CBOR tag 42)
    Link(Cid),
}

impl TreeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key on a map value
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        match self {
            TreeValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Index into a list value
    pub fn at(&self, index: usize) -> Option<&TreeValue> {
        match self {
            TreeValue::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Build a `{"/": value}` link marker
    pub fn marker(value: TreeValue) -> TreeValue {
        let mut map = BTreeMap::new();
        map.insert(LINK_MARKER.to_string(), value);
        TreeValue::Map(map)
    }

    /// Short kind name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            TreeValue::Null => "null",
            TreeValue::Bool(_) => "bool",
            TreeValue::Integer(_) => "integer",
            TreeValue::Float(_) => "float",
            TreeValue::String(_) => "string",
            TreeValue::Bytes(_) => "bytes",
            TreeValue::List(_) => "list",
            TreeValue::Map(_) => "map",
            TreeValue::Link(_) => "link",
        }
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<i64> for TreeValue {
    fn from(n: i64) -> Self {
        TreeValue::Integer(n as i128)
    }
}

impl From<Cid> for TreeValue {
    fn from(cid: Cid) -> Self {
        TreeValue::Link(cid)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        TreeValue::List(items)
    }
}

impl From<BTreeMap<String, TreeValue>> for TreeValue {
    fn from(map: BTreeMap<String, TreeValue>) -> Self {
        TreeValue::Map(map)
    }
}

/// DAG-JSON shaped input
///
/// `{"/": ...}` objects are kept as single-key maps so link discovery sees
/// and canonicalizes them like any other marker.
impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TreeValue::Null,
            serde_json::Value::Bool(b) => TreeValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TreeValue::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    TreeValue::Integer(u as i128)
                } else {
                    TreeValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => TreeValue::String(s),
            serde_json::Value::Array(items) => {
                TreeValue::List(items.into_iter().map(TreeValue::from).collect())
            }
            serde_json::Value::Object(entries) => TreeValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, TreeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Bool(b) => serializer.serialize_bool(*b),
            TreeValue::Integer(n) => {
                if let Ok(i) = i64::try_from(*n) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(*n) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.serialize_i128(*n)
                }
            }
            TreeValue::Float(f) => serializer.serialize_f64(*f),
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Bytes(bytes) => serializer.serialize_bytes(bytes),
            TreeValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            TreeValue::Link(cid) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(LINK_MARKER, &cid.to_string())?;
                map.end()
            }
        }
    }
}
