//! Prelude module - commonly used types for convenient import.
//!
//! Use `use logattr::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use logattr::prelude::*;
//!
//! let attrs = remove_empty_attrs(vec![Attr::nil("gone"), Attr::int("kept", 1)]);
//! assert_eq!(attrs, vec![Attr::int("kept", 1)]);
//! ```

// Errors
pub use crate::{AttrError, AttrResult};

// Attribute model
pub use crate::{AnyValue, Attr, ErrorValue, Kind, LogValuer, TextMarshal, Value};

// Tree helpers
pub use crate::{
    append_attrs_to_group, attrs_to_map, extract_error, find_attribute, remove_empty_attrs,
    replace_attrs, value_to_string,
};
pub use crate::{AttrMap, MapValue, ReplaceAttrFn};

// Handler pipeline
pub use crate::{AttrConfig, PreparedRecord, Record, prepare_record};
