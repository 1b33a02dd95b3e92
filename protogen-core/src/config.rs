//! Optional `protogen.toml` configuration file.

use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::{Error, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "protogen.toml";

/// Default name of the generated file written into each package directory.
pub const DEFAULT_GOFILE: &str = "proto_generator.go";

/// Settings read from `protogen.toml`.
///
/// Every field is optional; command line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Name of the generated file.
    pub gofile: Option<String>,
    /// Directory names that are never descended into.
    pub exclude: Vec<String>,
    /// Whether to recurse into subdirectories.
    pub recurse: Option<bool>,
    /// Abort the whole run on the first failing directory.
    pub fail_fast: Option<bool>,
}

impl ConfigFile {
    /// Parse configuration from a string, reporting errors against `filename`.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            span: source.span().map(SourceSpan::from),
            src: NamedSource::new(filename, content.to_string()),
            source,
        })
    }

    /// Open and parse a configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load `path` if given, otherwise `protogen.toml` in the current
    /// directory when it exists, otherwise defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if default.is_file() {
                    Self::open(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
