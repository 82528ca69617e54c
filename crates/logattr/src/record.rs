//! Log records as seen by a handler, and the helpers that lift record data
//! into attributes.
//!
//! A [`Record`] is either built directly or captured from a `tracing` event
//! with [`Record::from_event`], which is what a `tracing_subscriber::Layer`
//! forwarding to an external sink would do in `on_event`.

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level};

use crate::attr::Attr;
use crate::value::{ErrorValue, Value};

/// Name of the field `tracing` uses for the event message.
const MESSAGE_FIELD: &str = "message";

/// Where a record was emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Enclosing function or module path; empty when unknown.
    pub function: String,
    /// Source file.
    pub file: String,
    /// Line within `file`.
    pub line: u32,
}

/// A single log record: time, level, message, attributes and origin.
#[derive(Debug, Clone)]
pub struct Record {
    /// When the record was created.
    pub time: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// Log message.
    pub message: String,
    /// Emission site, if known.
    pub source: Option<SourceLocation>,
    attrs: Vec<Attr>,
}

impl Record {
    /// Create a record stamped with the current time and the caller's location.
    #[must_use]
    #[track_caller]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            source: Some(SourceLocation {
                function: String::new(),
                file: location.file().to_owned(),
                line: location.line(),
            }),
            attrs: Vec::new(),
        }
    }

    /// Capture a `tracing` event.
    ///
    /// The `message` field becomes the record message; every other field
    /// becomes an attribute in declaration order. Errors recorded with
    /// `field = &err as &dyn Error` are kept as error values.
    #[must_use]
    pub fn from_event(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let source = metadata.file().map(|file| SourceLocation {
            function: metadata.module_path().unwrap_or_default().to_owned(),
            file: file.to_owned(),
            line: metadata.line().unwrap_or_default(),
        });

        Self {
            time: Utc::now(),
            level: *metadata.level(),
            message: visitor.message.unwrap_or_default(),
            source,
            attrs: visitor.attrs,
        }
    }

    /// Override the record time.
    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Record the enclosing module path as the source function.
    #[must_use]
    pub fn with_module_path(mut self, module_path: &str) -> Self {
        if let Some(source) = self.source.as_mut() {
            module_path.clone_into(&mut source.function);
        }
        self
    }

    /// Append attributes, builder style.
    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.add_attrs(attrs);
        self
    }

    /// Append attributes.
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }
}

/// An error captured from a `tracing` event.
///
/// `tracing` lends errors only for the duration of the visit, so the message
/// and source chain are copied out.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct EventError {
    message: String,
    chain: Vec<String>,
}

impl EventError {
    fn capture(err: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            chain,
        }
    }

    /// Messages of the error's sources, outermost first.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    attrs: Vec<Attr>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        self.attrs.push(Attr::new(field.name(), value));
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(value.to_owned());
        } else {
            self.push(field, Value::String(value.to_owned()));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.push(field, Value::from(ErrorValue::new(EventError::capture(value))));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push(field, Value::String(format!("{value:?}")));
        }
    }
}

/// Copy `attrs` and append the record's attributes nested under `groups`.
///
/// Each record attribute gets its own chain of group wrappers, outermost
/// group first.
#[must_use]
pub fn append_record_attrs_to_attrs(attrs: &[Attr], groups: &[String], record: &Record) -> Vec<Attr> {
    let mut output = attrs.to_vec();
    output.extend(record.attrs().iter().cloned().map(|attr| {
        groups
            .iter()
            .rev()
            .fold(attr, |inner, group| Attr::group(group.clone(), vec![inner]))
    }));
    output
}

/// Build the `function`/`file`/`line` group describing where `record` came from.
#[must_use]
pub fn source(source_key: &str, record: &Record) -> Attr {
    let location = record.source.clone().unwrap_or_default();
    Attr::group(
        source_key,
        vec![
            Attr::string("function", location.function),
            Attr::string("file", location.file),
            Attr::int("line", i64::from(location.line)),
        ],
    )
}
