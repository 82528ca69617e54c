//! Error extraction and formatting.

use crate::attr::Attr;
use crate::map::{AttrMap, MapValue};
use crate::value::ErrorValue;

/// Remove the first top-level error attribute whose key is one of `error_keys`.
///
/// Attributes are scanned in order and groups are not descended into. An
/// attribute whose key matches but whose resolved value is not an error is
/// left in place. At most one error is extracted per call.
#[must_use]
pub fn extract_error<S: AsRef<str>>(
    mut attrs: Vec<Attr>,
    error_keys: &[S],
) -> (Vec<Attr>, Option<ErrorValue>) {
    let found = attrs.iter().enumerate().find_map(|(index, attr)| {
        if !error_keys.iter().any(|key| key.as_ref() == attr.key) {
            return None;
        }
        attr.value
            .resolved()
            .as_error()
            .map(|err| (index, err.clone()))
    });

    match found {
        Some((index, err)) => {
            attrs.remove(index);
            (attrs, Some(err))
        },
        None => (attrs, None),
    }
}

/// Describe an error as a map with `kind`, `error` and `stack` entries.
///
/// `stack` is always [`MapValue::Null`]; stack capture is not implemented.
#[must_use]
pub fn format_error(err: &ErrorValue) -> AttrMap {
    AttrMap::from([
        ("kind".to_owned(), MapValue::from(err.type_name())),
        ("error".to_owned(), MapValue::String(err.to_string())),
        ("stack".to_owned(), MapValue::Null),
    ])
}

/// Replace the first error entry found under `error_keys` with [`format_error`].
#[must_use]
pub fn format_error_key<S: AsRef<str>>(mut values: AttrMap, error_keys: &[S]) -> AttrMap {
    for key in error_keys {
        let formatted = match values.get(key.as_ref()) {
            Some(MapValue::Error(err)) => format_error(err),
            _ => continue,
        };
        values.insert(key.as_ref().to_owned(), MapValue::Map(formatted));
        break;
    }
    values
}
