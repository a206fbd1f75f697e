//! Error types for lua-weld
//!
//! Only conditions that abort a run live here. Unsupported argument and
//! return types are not errors unless strict mode is enabled; they are
//! reported as [`Degradation`](crate::codegen::Degradation) diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for lua-weld operations
pub type WeldResult<T> = Result<T, WeldError>;

/// Main error type for lua-weld
#[derive(Debug, Error)]
pub enum WeldError {
    /// IO error while reading or writing a specific file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declaration or resource source does not exist
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Output path not configured
    #[error("Output path not set: {0}")]
    OutputPathNotSet(&'static str),

    /// Configuration file could not be parsed
    #[error("Configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarMissing(String),

    /// A marshaling template is missing its placeholder
    #[error("Invalid {kind} template for `{type_name}`: expected a `{placeholder}` placeholder")]
    InvalidTemplate {
        kind: &'static str,
        type_name: String,
        placeholder: &'static str,
    },

    /// Strict mode rejected a type the registry cannot marshal
    #[error("Unsupported type `{type_name}` in {owner}::{member} ({position})")]
    Unsupported {
        owner: String,
        member: String,
        type_name: String,
        position: String,
    },
}

impl WeldError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WeldError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        WeldError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Read a file to a string, mapping a missing file to `SourceNotFound`
    pub(crate) fn read_source(path: &std::path::Path) -> WeldResult<String> {
        std::fs::read_to_string(path).map_err(|e| Self::from_read(path, e))
    }

    /// Read a file to bytes, mapping a missing file to `SourceNotFound`
    pub(crate) fn read_source_bytes(path: &std::path::Path) -> WeldResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| Self::from_read(path, e))
    }

    fn from_read(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            WeldError::SourceNotFound(path.to_path_buf())
        } else {
            WeldError::io(path, e)
        }
    }
}
