//! Drive the attribute pipeline from a `tracing_subscriber` layer, the way a
//! handler forwarding events to an external sink would.

use std::sync::{Arc, Mutex};

use logattr::prelude::*;
use logattr::{EventError, attrs_to_string, format_error, to_json};
use serde_json::json;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, registry};

#[derive(Clone, Default)]
struct CaptureLayer {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureLayer {
    fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.records.lock().unwrap().push(Record::from_event(event));
    }
}

fn capture(f: impl FnOnce()) -> Vec<Record> {
    let layer = CaptureLayer::default();
    let subscriber = registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer.take()
}

#[derive(Debug, thiserror::Error)]
#[error("query failed")]
struct QueryError {
    #[source]
    source: std::io::Error,
}

#[test]
fn test_event_fields_become_attributes() {
    let records = capture(|| {
        tracing::info!(user = "alice", attempts = 3_u64, admin = false, "login");
    });

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.message, "login");
    assert_eq!(record.level, tracing::Level::INFO);
    assert_eq!(
        record.attrs(),
        &[
            Attr::string("user", "alice"),
            Attr::uint("attempts", 3),
            Attr::bool("admin", false),
        ]
    );

    let source = record.source.as_ref().unwrap();
    assert_eq!(source.file, file!());
    assert_eq!(source.function, module_path!());
}

#[test]
fn test_event_error_is_extracted() {
    let err = QueryError {
        source: std::io::Error::other("socket closed"),
    };
    let records = capture(|| {
        tracing::error!(error = &err as &dyn std::error::Error, table = "users", "lookup");
    });

    let prepared = prepare_record(&AttrConfig::default(), &[], &[], &records[0], None);
    assert_eq!(prepared.attrs, vec![Attr::string("table", "users")]);

    let error = prepared.error.unwrap();
    assert_eq!(error.to_string(), "query failed");
    let captured = error.downcast_ref::<EventError>().unwrap();
    assert_eq!(captured.chain(), ["socket closed"]);

    let formatted = format_error(&error);
    assert_eq!(formatted["error"], MapValue::from("query failed"));
}

#[test]
fn test_handler_groups_and_redaction() {
    let records = capture(|| {
        tracing::warn!(password = "hunter2", path = "/login", "denied");
    });

    let redact = |_: &[String], attr: Attr| {
        if attr.key == "password" {
            Attr::string(attr.key, "********")
        } else {
            attr
        }
    };
    let groups = vec!["http".to_owned()];
    let prepared = prepare_record(
        &AttrConfig::default(),
        &[Attr::string("service", "gateway")],
        &groups,
        &records[0],
        Some(&redact as &ReplaceAttrFn<'_>),
    );

    assert_eq!(
        to_json(&attrs_to_map(&prepared.attrs)).unwrap(),
        json!({
            "service": "gateway",
            "http": {"password": "********", "path": "/login"},
        })
    );

    let found = find_attribute(&prepared.attrs, &groups, "path").unwrap();
    assert_eq!(found.value.as_str(), Some("/login"));
}

#[test]
fn test_debug_fields_are_stringified() {
    let records = capture(|| {
        tracing::debug!(ids = ?vec![1, 2], "batch");
    });

    let flat = attrs_to_string(records[0].attrs());
    assert_eq!(flat["ids"], "[1, 2]");
}
