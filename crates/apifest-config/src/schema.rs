//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use apifest_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// A document the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// The routing mapping consumed by the gateway.
    Mapping,
    /// The endpoint documentation consumed by the docs renderer.
    Doc,
}

impl OutputMode {
    /// Parses a comma separated mode list such as `mapping,doc`.
    ///
    /// Duplicates are dropped. An empty list selects [`OutputMode::Mapping`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown mode name.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_config::OutputMode;
    ///
    /// let modes = OutputMode::parse_list("doc, mapping").unwrap();
    /// assert_eq!(modes, vec![OutputMode::Doc, OutputMode::Mapping]);
    /// assert_eq!(OutputMode::parse_list("").unwrap(), vec![OutputMode::Mapping]);
    /// ```
    pub fn parse_list(value: &str) -> Result<Vec<Self>, ConfigError> {
        let mut modes = Vec::new();
        for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let mode = name.parse()?;
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        if modes.is_empty() {
            modes = default_modes();
        }
        Ok(modes)
    }
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mapping" => Ok(Self::Mapping),
            "doc" => Ok(Self::Doc),
            other => Err(ConfigError::invalid_value(
                "mapping.mode",
                format!("unknown mode '{other}', expected 'mapping' or 'doc'"),
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping => f.write_str("mapping"),
            Self::Doc => f.write_str("doc"),
        }
    }
}

/// Mapping section: version, requested documents and their file names.
///
/// # Example
///
/// ```
/// use apifest_config::{MappingSection, OutputMode};
///
/// let section = MappingSection {
///     version: Some("v1".to_string()),
///     mode: vec![OutputMode::Mapping, OutputMode::Doc],
///     filename: Some("all-mappings.json".to_string()),
///     docs_filename: Some("all-mappings-docs.json".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MappingSection {
    /// Mapping version, prefixed to every external path.
    #[serde(default)]
    pub version: Option<String>,

    /// Documents to produce.
    #[serde(default = "default_modes")]
    pub mode: Vec<OutputMode>,

    /// Routing mapping output file.
    #[serde(default)]
    pub filename: Option<String>,

    /// Documentation output file.
    #[serde(default)]
    pub docs_filename: Option<String>,
}

impl Default for MappingSection {
    fn default() -> Self {
        Self {
            version: None,
            mode: default_modes(),
            filename: None,
            docs_filename: None,
        }
    }
}

fn default_modes() -> Vec<OutputMode> {
    vec![OutputMode::Mapping]
}

/// Default backend section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    /// Default backend host.
    #[serde(default)]
    pub host: Option<String>,

    /// Default backend port.
    #[serde(default)]
    pub port: Option<u16>,
}

/// Run-wide defaults applied to every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    /// Action class used when an endpoint declares none.
    #[serde(default)]
    pub action_class: Option<String>,

    /// Filter class used when an endpoint declares none.
    #[serde(default)]
    pub filter_class: Option<String>,

    /// Prefix for every internal path.
    #[serde(default)]
    pub application_path: Option<String>,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g., "info", "apifest_extract=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingSection {
    /// Converts the section into a logging configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            ..LogConfig::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
