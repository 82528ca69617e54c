//! Handler-side options for the attribute pipeline.
//!
//! [`AttrConfig`] implements [`Default`] with the values handlers usually
//! want, so an empty TOML document yields a working configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AttrError, AttrResult};

/// Maximum config file size accepted by [`AttrConfig::load`].
const MAX_CONFIG_FILE_SIZE: u64 = 65_536;

/// Options consumed by [`crate::prepare_record`] and handler adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttrConfig {
    /// Keys checked, in order, when extracting the record error.
    pub error_keys: Vec<String>,
    /// Whether to attach the source location group.
    pub add_source: bool,
    /// Key of the source location group.
    pub source_key: String,
    /// Whether to prune empty attributes.
    pub remove_empty: bool,
    /// Whether request formatting leaves headers out.
    pub ignore_request_headers: bool,
}

impl Default for AttrConfig {
    fn default() -> Self {
        Self {
            error_keys: vec!["error".to_owned(), "err".to_owned()],
            add_source: false,
            source_key: "source".to_owned(),
            remove_empty: true,
            ignore_request_headers: false,
        }
    }
}

impl AttrConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ParseError`] if the document is not valid TOML or
    /// does not match the expected shape.
    pub fn from_toml_str(content: &str) -> AttrResult<Self> {
        toml::from_str(content).map_err(|e| AttrError::ParseError {
            path: "<inline>".to_owned(),
            source: e,
        })
    }

    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::ReadError`] if the file cannot be read or is
    /// unreasonably large, and [`AttrError::ParseError`] if it cannot be
    /// parsed.
    pub fn load(path: &Path) -> AttrResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| AttrError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AttrError::ReadError {
                path: path.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                        metadata.len()
                    ),
                ),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| AttrError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| AttrError::ParseError {
            path: path.display().to_string(),
            source: e,
        })
    }
}
