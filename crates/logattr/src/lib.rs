//! logattr - Attribute-tree helpers for structured logging handlers.
//!
//! This crate provides:
//! - A closed [`Value`] model for log attributes, including nested groups,
//!   opaque values and self-describing [`LogValuer`]s
//! - Flattening attribute trees into maps with deep group merging
//! - Depth-first replace/redact traversal with group paths
//! - Group-path append and lookup
//! - Error extraction and formatting
//! - Empty-attribute pruning and value stringification
//! - Adapters for `tracing` events, source locations, context extractors and
//!   HTTP requests
//!
//! Every helper is a pure transformation: no I/O, no shared state.
//!
//! # Example
//!
//! ```rust
//! use logattr::{Attr, ReplaceAttrFn, attrs_to_map, extract_error, replace_attrs};
//!
//! let attrs = vec![
//!     Attr::string("user", "alice"),
//!     Attr::group("auth", vec![Attr::string("password", "hunter2")]),
//!     Attr::error("error", std::io::Error::other("denied")),
//! ];
//!
//! let mask = |_: &[String], attr: Attr| {
//!     if attr.key == "password" {
//!         Attr::string(attr.key, "********")
//!     } else {
//!         attr
//!     }
//! };
//! let masked = replace_attrs(Some(&mask as &ReplaceAttrFn<'_>), &[], attrs);
//! let (attrs, err) = extract_error(masked, &["error", "err"]);
//!
//! assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("denied"));
//! let map = attrs_to_map(&attrs);
//! assert_eq!(map["auth"].as_map().unwrap()["password"].as_str(), Some("********"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod attr;
mod config;
mod context;
mod error;
mod extract;
mod group;
mod map;
mod pipeline;
mod prune;
mod record;
mod render;
mod replace;
#[cfg(feature = "http")]
mod request;
mod value;

pub use attr::Attr;
pub use config::AttrConfig;
pub use context::{AttrFromContext, context_extractor};
pub use error::{AttrError, AttrResult};
pub use extract::{extract_error, format_error, format_error_key};
pub use group::{append_attrs_to_group, find_attribute};
pub use map::{AttrMap, MapValue, attr_to_value, attrs_to_map, attrs_to_string, to_json};
pub use pipeline::{PreparedRecord, prepare_record};
pub use prune::remove_empty_attrs;
pub use record::{EventError, Record, SourceLocation, append_record_attrs_to_attrs, source};
pub use render::{any_value_to_string, format_duration, value_to_string};
pub use replace::{ReplaceAttrFn, replace_attrs};
#[cfg(feature = "http")]
pub use request::format_request;
pub use value::{
    AnyValue, ErrorValue, Kind, LogValuer, MAX_RESOLVE_STEPS, ObjectValue, TextMarshal, Value,
    time_value,
};
