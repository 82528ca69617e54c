//! The [`Attr`] key/value pair and its constructors.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::value::{LogValuer, TextMarshal, Value, time_value};

/// A structured log attribute.
///
/// Keys are not required to be unique within a sequence; when a value is a
/// [`Value::Group`] the attribute forms a nested scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attr {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Value,
}

impl Attr {
    /// Create an attribute from anything convertible to a [`Value`].
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// String attribute.
    #[must_use]
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    /// Signed integer attribute.
    #[must_use]
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    /// Unsigned integer attribute.
    #[must_use]
    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    /// Float attribute.
    #[must_use]
    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    /// Boolean attribute.
    #[must_use]
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    /// Duration attribute.
    #[must_use]
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// Timestamp attribute, stored with its original offset.
    #[must_use]
    pub fn time<Tz: TimeZone>(key: impl Into<String>, value: &DateTime<Tz>) -> Self {
        Self::new(key, time_value(value))
    }

    /// Group attribute.
    #[must_use]
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    /// Error attribute.
    #[must_use]
    pub fn error<E>(key: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(key, Value::error(err))
    }

    /// Opaque attribute rendered through `Debug`.
    #[must_use]
    pub fn object<T>(key: impl Into<String>, value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self::new(key, Value::object(value))
    }

    /// Opaque attribute rendered through [`TextMarshal`].
    #[must_use]
    pub fn text<T>(key: impl Into<String>, value: T) -> Self
    where
        T: TextMarshal + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(key, Value::text(value))
    }

    /// Self-describing attribute.
    #[must_use]
    pub fn valuer<V>(key: impl Into<String>, valuer: V) -> Self
    where
        V: LogValuer + 'static,
    {
        Self::new(key, Value::valuer(valuer))
    }

    /// Nil attribute; returned by replace callbacks to mark `key` as removed.
    #[must_use]
    pub fn nil(key: impl Into<String>) -> Self {
        Self::new(key, Value::nil())
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
