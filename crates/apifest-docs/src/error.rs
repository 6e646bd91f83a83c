//! Error types for the emitter crate.
//!
//! This module defines errors that can occur while rendering or writing the
//! routing mapping and documentation documents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize a document to JSON.
    #[error("Failed to serialize document: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The generator is missing required information.
    #[error("Generator missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Failed to write a document.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        /// Destination path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DocsError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for document generation.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let err: DocsError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocsError::SerializationError(_)));
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_missing_field_error() {
        let err = DocsError::missing_field("backend.host");
        assert_eq!(err.to_string(), "Generator missing required field: backend.host");
    }

    #[test]
    fn test_write_error() {
        let err = DocsError::WriteError {
            path: PathBuf::from("/out/mapping.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/out/mapping.json"));
        assert!(message.contains("denied"));
    }
}
