//! Text rendering of attribute values.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use crate::value::{AnyValue, Value};

/// Render any value as a string.
///
/// Scalars use their canonical text form; groups, opaque and self-describing
/// values go through [`any_value_to_string`].
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Uint(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Duration(d) => format_duration(*d),
        Value::Time(t) => format_time(t),
        Value::Group(_) | Value::Any(_) | Value::LogValuer(_) => any_value_to_string(value),
    }
}

/// Render a value through its text capability, falling back to a
/// structural rendering.
///
/// A failing text marshal yields an empty string.
#[must_use]
pub fn any_value_to_string(value: &Value) -> String {
    match value {
        Value::Any(AnyValue::Nil) => "<nil>".to_owned(),
        Value::Any(AnyValue::Error(err)) => err.to_string(),
        Value::Any(AnyValue::Object(obj)) => match obj.marshal_text() {
            Some(Ok(text)) => text,
            Some(Err(err)) => {
                debug!(%err, "text marshaling failed, rendering empty string");
                String::new()
            },
            None => format!("{obj:?}"),
        },
        Value::LogValuer(valuer) => format!("{valuer:?}"),
        Value::Group(attrs) => {
            let inner: Vec<String> = attrs.iter().map(ToString::to_string).collect();
            format!("[{}]", inner.join(" "))
        },
        scalar => value_to_string(scalar),
    }
}

/// Compact duration form: `0s`, `250ns`, `1.5ms`, `42s`, `1m30s`, `2h0m5.25s`.
#[must_use]
// Safety: all divisors are non-zero constants and the products fit in u128.
#[allow(clippy::arithmetic_side_effects)]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    match nanos {
        0 => "0s".to_owned(),
        1..1_000 => format!("{nanos}ns"),
        1_000..1_000_000 => format!("{}µs", with_fraction(nanos, 1_000, 3)),
        1_000_000..1_000_000_000 => format!("{}ms", with_fraction(nanos, 1_000_000, 6)),
        _ => {
            let secs = duration.as_secs();
            let hours = secs / 3600;
            let minutes = secs / 60 % 60;
            let seconds = with_fraction(
                u128::from(secs % 60) * 1_000_000_000 + u128::from(duration.subsec_nanos()),
                1_000_000_000,
                9,
            );
            if hours > 0 {
                format!("{hours}h{minutes}m{seconds}s")
            } else if minutes > 0 {
                format!("{minutes}m{seconds}s")
            } else {
                format!("{seconds}s")
            }
        },
    }
}

// Safety: `unit` is always a non-zero constant.
#[allow(clippy::arithmetic_side_effects)]
fn with_fraction(value: u128, unit: u128, width: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

fn format_time(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&Utc)
        .format("%Y-%m-%d %H:%M:%S%.f +0000 UTC")
        .to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}
