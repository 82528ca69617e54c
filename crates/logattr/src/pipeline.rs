//! The per-record attribute pipeline handlers run before encoding.

use tracing::trace;

use crate::attr::Attr;
use crate::config::AttrConfig;
use crate::extract::extract_error;
use crate::prune::remove_empty_attrs;
use crate::record::{Record, append_record_attrs_to_attrs, source};
use crate::replace::{ReplaceAttrFn, replace_attrs};
use crate::value::ErrorValue;

/// Attributes of a record after the pipeline has run.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRecord {
    /// Final attribute tree.
    pub attrs: Vec<Attr>,
    /// Error pulled out of the top-level attributes, if any.
    pub error: Option<ErrorValue>,
}

/// Collect, mask, prune and split the attributes of `record`.
///
/// `handler_attrs` are the attributes accumulated on the handler and `groups`
/// the groups it has opened; record attributes are nested under `groups`.
/// The replace callback runs from the root so it sees full group paths.
#[must_use]
pub fn prepare_record(
    config: &AttrConfig,
    handler_attrs: &[Attr],
    groups: &[String],
    record: &Record,
    replace: Option<&ReplaceAttrFn<'_>>,
) -> PreparedRecord {
    let mut attrs = append_record_attrs_to_attrs(handler_attrs, groups, record);
    if config.add_source {
        attrs.push(source(&config.source_key, record));
    }

    let attrs = replace_attrs(replace, &[], attrs);
    let attrs = if config.remove_empty {
        remove_empty_attrs(attrs)
    } else {
        attrs
    };

    let (attrs, error) = extract_error(attrs, &config.error_keys);
    trace!(
        attrs = attrs.len(),
        has_error = error.is_some(),
        "prepared record attributes"
    );

    PreparedRecord { attrs, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use tracing::Level;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct Reset;

    fn redact(groups: &[String], attr: Attr) -> Attr {
        if attr.key == "password" {
            return Attr::nil(attr.key);
        }
        if groups.first().is_some_and(|g| g == "request") && attr.key == "token" {
            return Attr::string(attr.key, "[redacted]");
        }
        attr
    }

    #[test]
    fn test_prepare_record_defaults() {
        let record = Record::new(Level::ERROR, "login failed").with_attrs([
            Attr::error("error", Reset),
            Attr::string("password", "hunter2"),
            Attr::string("user", "alice"),
        ]);

        let prepared = prepare_record(
            &AttrConfig::default(),
            &[Attr::string("service", "auth")],
            &[],
            &record,
            Some(&redact),
        );

        assert_eq!(prepared.error.unwrap().to_string(), "connection reset");
        assert_eq!(
            prepared.attrs,
            vec![Attr::string("service", "auth"), Attr::string("user", "alice")]
        );
    }

    #[test]
    fn test_prepare_record_nests_under_groups() {
        let record = Record::new(Level::INFO, "request").with_attrs([
            Attr::string("token", "abc"),
            Attr::int("status", 200),
        ]);
        let groups = vec!["request".to_owned()];

        let prepared = prepare_record(&AttrConfig::default(), &[], &groups, &record, Some(&redact));

        assert!(prepared.error.is_none());
        assert_eq!(
            prepared.attrs,
            vec![
                Attr::group("request", vec![Attr::string("token", "[redacted]")]),
                Attr::group("request", vec![Attr::int("status", 200)]),
            ]
        );
    }

    #[test]
    fn test_prepare_record_keeps_empty_when_disabled() {
        let config = AttrConfig {
            remove_empty: false,
            ..AttrConfig::default()
        };
        let record = Record::new(Level::WARN, "w").with_attrs([Attr::nil("gone")]);

        let prepared = prepare_record(&config, &[], &[], &record, None);
        assert_eq!(prepared.attrs, vec![Attr::new("gone", Value::nil())]);
    }

    #[test]
    fn test_prepare_record_adds_source() {
        let config = AttrConfig {
            add_source: true,
            source_key: "caller".to_owned(),
            ..AttrConfig::default()
        };
        let record = Record::new(Level::DEBUG, "d");

        let prepared = prepare_record(&config, &[], &[], &record, None);
        assert_eq!(prepared.attrs.len(), 1);
        assert_eq!(prepared.attrs[0].key, "caller");
        let children = prepared.attrs[0].value.as_group().unwrap();
        assert_eq!(children[1], Attr::string("file", file!()));
    }
}
