//! Error types for ApiFest.
//!
//! This module provides the [`ApifestError`] type, which is the standard error
//! type used by the extraction core. Tag validation failures are fatal for the
//! run; recoverable format problems (a malformed backend port, a malformed
//! exception code) never surface here and are logged instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ApifestError`].
pub type ApifestResult<T> = Result<T, ApifestError>;

/// Errors raised while reading method descriptors or assembling endpoints.
#[derive(Debug, Error)]
pub enum ApifestError {
    /// A tag carries a value outside its accepted set.
    #[error("value \"{value}\" not supported for {tag} tag")]
    UnsupportedValue {
        /// The tag that carried the value.
        tag: String,
        /// The offending value.
        value: String,
    },

    /// Assembly of a single endpoint failed.
    #[error("endpoint {endpoint}: {source}")]
    Endpoint {
        /// External path of the endpoint (or the method name when unknown).
        endpoint: String,
        /// The underlying failure.
        #[source]
        source: Box<ApifestError>,
    },

    /// One or more endpoints failed to assemble.
    #[error("{} endpoint(s) failed to assemble: {}", .errors.len(), summarize(.errors))]
    Batch {
        /// Every endpoint failure, in discovery order.
        errors: Vec<ApifestError>,
    },

    /// The method descriptor file could not be read.
    #[error("failed to read method descriptors from {path}: {source}")]
    ReadDescriptors {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The method descriptor document is not valid.
    #[error("invalid method descriptors: {0}")]
    InvalidDescriptors(#[from] serde_json::Error),
}

impl ApifestError {
    /// Creates an unsupported tag value error.
    #[must_use]
    pub fn unsupported_value(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Wraps an error with the endpoint it was raised for.
    #[must_use]
    pub fn endpoint(endpoint: impl Into<String>, source: Self) -> Self {
        Self::Endpoint {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Creates a batch error from collected endpoint failures.
    #[must_use]
    pub fn batch(errors: Vec<Self>) -> Self {
        Self::Batch { errors }
    }

    /// Returns the individual endpoint failures carried by this error.
    ///
    /// A non-batch error is returned as a single-element slice.
    #[must_use]
    pub fn endpoint_errors(&self) -> &[Self] {
        match self {
            Self::Batch { errors } => errors,
            other => std::slice::from_ref(other),
        }
    }
}

fn summarize(errors: &[ApifestError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_value_message() {
        let err = ApifestError::unsupported_value("apifest.auth.type", "admin");
        assert_eq!(
            err.to_string(),
            "value \"admin\" not supported for apifest.auth.type tag"
        );
    }

    #[test]
    fn test_endpoint_wraps_source() {
        let err = ApifestError::endpoint(
            "/v1/users",
            ApifestError::unsupported_value("apifest.auth.type", "x"),
        );
        assert!(err.to_string().starts_with("endpoint /v1/users: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_batch_lists_every_failure() {
        let err = ApifestError::batch(vec![
            ApifestError::endpoint("/v1/a", ApifestError::unsupported_value("t", "1")),
            ApifestError::endpoint("/v1/b", ApifestError::unsupported_value("t", "2")),
        ]);
        let message = err.to_string();
        assert!(message.starts_with("2 endpoint(s) failed to assemble"));
        assert!(message.contains("/v1/a"));
        assert!(message.contains("/v1/b"));
        assert_eq!(err.endpoint_errors().len(), 2);
    }

    #[test]
    fn test_single_error_as_slice() {
        let err = ApifestError::unsupported_value("t", "v");
        assert_eq!(err.endpoint_errors().len(), 1);
    }
}
