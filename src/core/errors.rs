/*!
# Error types

Errors that cross module seams. Component failures inside a comparison are
recovered locally (a failed structural fingerprint scores 0), so only
malformed input and I/O problems reach the caller.
*/

use std::path::PathBuf;
use thiserror::Error;

use super::position::Position;

/// Errors surfaced to callers of the library
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File extension '{extension}' is not allowed: {path}")]
    ExtensionNotAllowed { path: PathBuf, extension: String },

    #[error("File size {size} exceeds maximum allowed size of {limit} bytes: {path}")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Failure to produce a structural fingerprint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
    #[error("Syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },

    #[error("Parser unavailable: {0}")]
    Parser(String),

    #[error("Structural extractor panicked: {0}")]
    Panicked(String),
}

impl StructureError {
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        StructureError::Syntax {
            position,
            message: message.into(),
        }
    }
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
