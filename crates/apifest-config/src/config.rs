//! Main configuration types.
//!
//! This module provides the top-level [`ApifestConfig`] struct and its builder.

use std::borrow::Cow;

use apifest_core::AnnotationRegistry;
use serde::{Deserialize, Serialize};

use crate::{BackendSection, ConfigError, DefaultsSection, LoggingSection, MappingSection, OutputMode};

/// Complete generator configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use apifest_config::{ApifestConfig, OutputMode};
///
/// let config = ApifestConfig::default();
/// assert_eq!(config.mapping.mode, vec![OutputMode::Mapping]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ApifestConfig {
    /// Version, output modes and file names.
    #[serde(default)]
    pub mapping: MappingSection,

    /// Default backend.
    #[serde(default)]
    pub backend: BackendSection,

    /// Default action, filter and application path.
    #[serde(default)]
    pub defaults: DefaultsSection,

    /// Custom annotations whose attributes become custom properties.
    #[serde(default)]
    pub annotations: AnnotationRegistry,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ApifestConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_config::ApifestConfig;
    ///
    /// let config = ApifestConfig::builder()
    ///     .version("v1")
    ///     .backend("localhost", 1212)
    ///     .filename("all-mappings.json")
    ///     .build();
    ///
    /// assert!(config.validate().is_ok());
    /// ```
    #[must_use]
    pub fn builder() -> ApifestConfigBuilder {
        ApifestConfigBuilder::new()
    }

    /// Returns the mapping version, unless unset.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        present(self.mapping.version.as_deref())
    }

    /// Returns the default backend host, unless unset.
    #[must_use]
    pub fn backend_host(&self) -> Option<&str> {
        present(self.backend.host.as_deref())
    }

    /// Returns the routing mapping file name, unless unset.
    ///
    /// A literal `null` selects `output_mapping_<version>.json`. An empty or
    /// absent name stays unset.
    #[must_use]
    pub fn mapping_filename(&self) -> Option<Cow<'_, str>> {
        let raw = self.mapping.filename.as_deref()?;
        if let Some(name) = present(Some(raw)) {
            return Some(Cow::Borrowed(name));
        }
        if raw.trim().eq_ignore_ascii_case("null") {
            return self
                .version()
                .map(|version| Cow::Owned(format!("output_mapping_{version}.json")));
        }
        None
    }

    /// Returns the documentation file name, unless unset.
    #[must_use]
    pub fn docs_filename(&self) -> Option<&str> {
        present(self.mapping.docs_filename.as_deref())
    }

    /// Returns the default action class, unless unset.
    #[must_use]
    pub fn default_action(&self) -> Option<&str> {
        present(self.defaults.action_class.as_deref())
    }

    /// Returns the default filter class, unless unset.
    #[must_use]
    pub fn default_filter(&self) -> Option<&str> {
        present(self.defaults.filter_class.as_deref())
    }

    /// Returns `true` if the given document is requested.
    #[must_use]
    pub fn wants(&self, mode: OutputMode) -> bool {
        self.mapping.mode.contains(&mode)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if:
    /// - The mapping version is unset
    /// - The backend host or port is unset while the mapping is requested
    /// - The output file name of a requested document is unset
    ///
    /// Returns `ConfigError::ValidationError` if no output mode is requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version().is_none() {
            return Err(ConfigError::missing_field("mapping.version"));
        }

        if self.mapping.mode.is_empty() {
            return Err(ConfigError::validation_error(
                "mapping.mode must request at least one of 'mapping' or 'doc'",
            ));
        }

        if self.wants(OutputMode::Mapping) {
            if self.backend_host().is_none() {
                return Err(ConfigError::missing_field("backend.host"));
            }
            if self.backend.port.is_none() {
                return Err(ConfigError::missing_field("backend.port"));
            }
            if self.mapping_filename().is_none() {
                return Err(ConfigError::missing_field("mapping.filename"));
            }
        }

        if self.wants(OutputMode::Doc) && self.docs_filename().is_none() {
            return Err(ConfigError::missing_field("mapping.docs_filename"));
        }

        Ok(())
    }
}

/// Treats empty values and the literal `null` as unset.
fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("null"))
}

/// Builder for [`ApifestConfig`].
#[derive(Debug, Default)]
pub struct ApifestConfigBuilder {
    config: ApifestConfig,
}

impl ApifestConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mapping version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.mapping.version = Some(version.into());
        self
    }

    /// Set the requested output modes.
    #[must_use]
    pub fn modes(mut self, modes: Vec<OutputMode>) -> Self {
        self.config.mapping.mode = modes;
        self
    }

    /// Set the routing mapping file name.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.config.mapping.filename = Some(filename.into());
        self
    }

    /// Set the documentation file name.
    #[must_use]
    pub fn docs_filename(mut self, filename: impl Into<String>) -> Self {
        self.config.mapping.docs_filename = Some(filename.into());
        self
    }

    /// Set the default backend.
    #[must_use]
    pub fn backend(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config.backend = BackendSection {
            host: Some(host.into()),
            port: Some(port),
        };
        self
    }

    /// Set the run-wide defaults.
    #[must_use]
    pub fn defaults(mut self, defaults: DefaultsSection) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// Set the custom annotation registry.
    #[must_use]
    pub fn annotations(mut self, annotations: AnnotationRegistry) -> Self {
        self.config.annotations = annotations;
        self
    }

    /// Set the logging section.
    #[must_use]
    pub fn logging(mut self, logging: LoggingSection) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ApifestConfig {
        self.config
    }
}
