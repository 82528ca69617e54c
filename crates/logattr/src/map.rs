//! Flattening attribute trees into plain maps.
//!
//! Repeated keys follow a last-write-wins policy, except that two groups under
//! the same key are deep-merged, in the same spirit as layered config merging:
//! maps merge per key, anything else replaces.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::attr::Attr;
use crate::render::value_to_string;
use crate::value::{AnyValue, ErrorValue, Value};

/// A flattened attribute tree.
pub type AttrMap = BTreeMap<String, MapValue>;

/// A value in an [`AttrMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue {
    /// Nil attribute.
    Null,
    /// String.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Duration.
    Duration(Duration),
    /// Timestamp normalized to UTC.
    Time(DateTime<Utc>),
    /// Error, kept intact so handlers can format it.
    Error(ErrorValue),
    /// Flattened group.
    Map(AttrMap),
}

impl MapValue {
    /// Nested map, if any.
    #[must_use]
    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// String payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for MapValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for MapValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<AttrMap> for MapValue {
    fn from(value: AttrMap) -> Self {
        Self::Map(value)
    }
}

impl Serialize for MapValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Uint(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            },
            Self::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            },
            Self::Error(err) => serializer.serialize_str(&err.to_string()),
            Self::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            },
        }
    }
}

/// Flatten attributes into a map, deep-merging groups that share a key.
#[must_use]
pub fn attrs_to_map(attrs: &[Attr]) -> AttrMap {
    let mut output = AttrMap::new();
    for attr in attrs {
        merge_attr(&mut output, attr);
    }
    output
}

fn merge_attr(output: &mut AttrMap, attr: &Attr) {
    let value = attr.value.resolved();
    if let Value::Group(children) = value.as_ref()
        && let Some(MapValue::Map(existing)) = output.get_mut(&attr.key)
    {
        for child in children {
            merge_attr(existing, child);
        }
        return;
    }
    output.insert(attr.key.clone(), to_map_value(&value));
}

/// Convert a single attribute into its map key and map value.
#[must_use]
pub fn attr_to_value(attr: &Attr) -> (&str, MapValue) {
    (attr.key.as_str(), to_map_value(&attr.value.resolved()))
}

fn to_map_value(value: &Value) -> MapValue {
    match value {
        Value::String(s) => MapValue::String(s.clone()),
        Value::Int(i) => MapValue::Int(*i),
        Value::Uint(u) => MapValue::Uint(*u),
        Value::Float(f) => MapValue::Float(*f),
        Value::Bool(b) => MapValue::Bool(*b),
        Value::Duration(d) => MapValue::Duration(*d),
        Value::Time(t) => MapValue::Time(t.with_timezone(&Utc)),
        Value::Group(children) => MapValue::Map(attrs_to_map(children)),
        Value::Any(AnyValue::Nil) => MapValue::Null,
        Value::Any(AnyValue::Error(err)) => MapValue::Error(err.clone()),
        Value::Any(AnyValue::Object(_)) | Value::LogValuer(_) => {
            MapValue::String(value_to_string(value))
        },
    }
}

/// Render top-level attributes as strings; later keys win.
#[must_use]
pub fn attrs_to_string(attrs: &[Attr]) -> BTreeMap<String, String> {
    attrs
        .iter()
        .map(|attr| (attr.key.clone(), value_to_string(&attr.value)))
        .collect()
}

/// Serialize a flattened map into a JSON object.
///
/// # Errors
///
/// Never fails for maps built by this crate; the signature mirrors
/// [`serde_json::to_value`].
pub fn to_json(map: &AttrMap) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(map)
}
