//! Error types for the generator pipeline.

use apifest_config::ConfigError;
use apifest_core::ApifestError;
use apifest_docs::DocsError;
use apifest_telemetry::TelemetryError;
use thiserror::Error;

/// Errors that abort a generator run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Method descriptors could not be read or an endpoint failed to assemble.
    #[error("Extraction error: {0}")]
    Extract(#[from] ApifestError),

    /// An output document could not be rendered or written.
    #[error("Output error: {0}")]
    Docs(#[from] DocsError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl GeneratorError {
    /// Short name of the failure class, used in exit messages.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Extract(ApifestError::Batch { .. } | ApifestError::Endpoint { .. }) => "endpoint",
            Self::Extract(_) => "input",
            Self::Docs(_) => "output",
            Self::Telemetry(_) => "logging",
        }
    }
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: GeneratorError = ConfigError::missing_field("mapping.version").into();
        assert_eq!(err.class(), "configuration");
        assert!(err.to_string().contains("mapping.version"));
    }

    #[test]
    fn test_endpoint_error_class() {
        let inner = ApifestError::unsupported_value("apifest.auth.type", "admin");
        let err: GeneratorError =
            ApifestError::batch(vec![ApifestError::endpoint("/v1/x", inner)]).into();
        assert_eq!(err.class(), "endpoint");
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_docs_error_class() {
        let err: GeneratorError = DocsError::missing_field("version").into();
        assert_eq!(err.class(), "output");
    }
}
