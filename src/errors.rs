/*!
 * Error types for the ng-i18n-tools crate.
 *
 * Every tool failure is reported through `I18nError`, which is built with the
 * thiserror crate. `ErrorKind` groups the variants into the categories a tool
 * caller sees.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Broad category of an `I18nError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A translation file, descriptor or unit id does not exist
    NotFound,
    /// Malformed XML, translation markup or descriptor JSON
    Parse,
    /// Tool arguments were rejected before any work was done
    Validation,
    /// The project descriptor lacks required structure
    Config,
    /// The extraction toolchain failed
    ExternalTool,
    /// Any other file system failure
    Io,
}

/// Errors raised by the document, settings and extraction layers
#[derive(Error, Debug)]
pub enum I18nError {
    /// Error when a file to be read does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Error when no translation unit carries the requested id
    #[error("Unit with id \"{id}\" not found.")]
    UnitNotFound {
        /// The requested unit id
        id: String,
    },

    /// Error when XML or JSON input is not well-formed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error when tool arguments are invalid
    #[error("{0}")]
    Validation(String),

    /// Error when the project descriptor is structurally unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error returned by the extraction toolchain
    #[error("Command `{command}` failed ({status}): {stderr}")]
    ExternalTool {
        /// Command line that was run
        command: String,
        /// Exit status, or the spawn failure
        status: String,
        /// Captured standard error output
        stderr: String,
    },

    /// Error from a file operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } | Self::UnitNotFound { .. } => ErrorKind::NotFound,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Config,
            Self::ExternalTool { .. } => ErrorKind::ExternalTool,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Map an I/O error raised while reading `path`, keeping missing files distinct
    pub fn from_read(error: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path: path.into() }
        } else {
            Self::Io(error)
        }
    }
}

impl From<quick_xml::Error> for I18nError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for I18nError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<serde_json::Error> for I18nError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Result alias used across the library
pub type Result<T, E = I18nError> = std::result::Result<T, E>;
