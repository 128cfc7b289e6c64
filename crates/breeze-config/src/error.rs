//! Error types for configuration loading.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where in a source file a problem was found.
///
/// Parser errors carry a line/column position. Errors found after parsing,
/// while extracting typed values, carry the dotted key path instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// 1-based line and column reported by the parser.
    Position {
        /// Line number (1-based)
        line: usize,
        /// Column number (1-based)
        column: usize,
    },
    /// Dotted key path, e.g. `variants.extend.ringWidth[0]`.
    Key(String),
    /// The parser did not report a position.
    Unknown,
}

impl SourceLocation {
    /// Location of a key path.
    pub fn key(path: impl Into<String>) -> Self {
        SourceLocation::Key(path.into())
    }

    /// Location from a 0-based byte offset into `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        SourceLocation::Position {
            line,
            column: offset - line_start + 1,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Position { line, column } => {
                write!(f, "line {}, column {}", line, column)
            }
            SourceLocation::Key(path) => write!(f, "key `{}`", path),
            SourceLocation::Unknown => write!(f, "unknown location"),
        }
    }
}

/// Errors that can occur while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source is not a valid declarative record, or a recognised key
    /// holds a value of the wrong shape.
    #[error("malformed config {}: {message} ({location})", .path.display())]
    MalformedConfig {
        /// File that failed to parse or validate
        path: PathBuf,
        /// Offending location inside that file
        location: SourceLocation,
        /// Parser or validation message
        message: String,
    },

    /// A `{palette:…}` or `{file:…}` reference could not be located.
    #[error("unresolved reference `{reference}` in {}: {reason}", .path.display())]
    UnresolvedReference {
        /// File containing the reference
        path: PathBuf,
        /// The reference text as written
        reference: String,
        /// Why resolution failed
        reason: String,
    },

    /// Unrecognised top-level key under a deny policy.
    #[error("unknown key `{key}` in {}", .path.display())]
    UnknownKey {
        /// File containing the key
        path: PathBuf,
        /// The unrecognised key
        key: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File extension does not map to a supported format.
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// No conventional config file exists under the project root.
    #[error("no breeze config file found in {}", .0.display())]
    NotFound(PathBuf),
}

impl ConfigError {
    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::MalformedConfig {
            path: path.into(),
            location,
            message: message.into(),
        }
    }

    pub(crate) fn unresolved(
        path: impl Into<PathBuf>,
        reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::UnresolvedReference {
            path: path.into(),
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// True for [`ConfigError::MalformedConfig`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, ConfigError::MalformedConfig { .. })
    }

    /// True for [`ConfigError::UnresolvedReference`].
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self, ConfigError::UnresolvedReference { .. })
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A shape problem in one key, found while extracting typed values.
///
/// Carries no file path; the document loader attaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub(crate) key: String,
    pub(crate) message: String,
}

impl FieldError {
    pub(crate) fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn into_config_error(self, path: impl Into<PathBuf>) -> ConfigError {
        ConfigError::malformed(path, SourceLocation::Key(self.key), self.message)
    }
}

pub(crate) type FieldResult<T> = Result<T, FieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_offset_counts_lines_and_columns() {
        let source = "a = 1\nbb = [\n  oops\n";
        let offset = source.find("oops").unwrap();
        assert_eq!(
            SourceLocation::from_offset(source, offset),
            SourceLocation::Position { line: 3, column: 3 }
        );
        assert_eq!(
            SourceLocation::from_offset(source, 0),
            SourceLocation::Position { line: 1, column: 1 }
        );
    }

    #[test]
    fn location_from_offset_clamps_past_end() {
        let loc = SourceLocation::from_offset("ab", 99);
        assert_eq!(loc, SourceLocation::Position { line: 1, column: 3 });
    }

    #[test]
    fn malformed_display_names_file_and_location() {
        let err = ConfigError::malformed(
            "/project/breeze.config.toml",
            SourceLocation::key("darkMode"),
            "unknown variant `sometimes`",
        );
        let msg = err.to_string();
        assert!(msg.contains("breeze.config.toml"));
        assert!(msg.contains("key `darkMode`"));
        assert!(err.is_malformed());
        assert!(!err.is_unresolved_reference());
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error as _;
        let err = ConfigError::Io {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert!(err.source().is_some());
    }
}
