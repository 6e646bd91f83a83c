//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, environment variables and command-line
//! overrides.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use apifest_core::AnnotationRegistry;

use crate::{ApifestConfig, ConfigError, OutputMode};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
/// 4. Explicit overrides (e.g. the `--mode` flag)
///
/// # Example
///
/// ```no_run
/// use apifest_config::ConfigLoader;
///
/// # fn main() -> Result<(), apifest_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("apifest.toml")?
///     .with_env_prefix("APIFEST")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: ApifestConfig,
    env_prefix: Option<String>,
    mode_override: Option<Vec<OutputMode>>,
    dotenv: Vec<(String, String)>,
    file_loaded: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::new();
    /// assert!(!loader.file_loaded());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ApifestConfig::default(),
            env_prefix: None,
            mode_override: None,
            dotenv: Vec::new(),
            file_loaded: false,
        }
    }

    /// Start with default configuration values.
    ///
    /// This is called automatically by `new()`, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = ApifestConfig::default();
        self
    }

    /// Load configuration from a file.
    ///
    /// Supports TOML (.toml) and JSON (.json) formats.
    /// The file format is determined by the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON
    /// - The file contains unknown fields or modes
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let file_config = Self::parse_file(&content, path)?;
        self.merge_config(file_config);
        self.file_loaded = true;

        Ok(self)
    }

    /// Load configuration from an optional file.
    ///
    /// If the file exists, loads it. If not, silently continues.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Configuration content as a string
    /// * `format` - File format ("toml" or "json")
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [mapping]
    ///     version = "v1"
    ///     filename = "all-mappings.json"
    ///
    ///     [backend]
    ///     host = "localhost"
    ///     port = 1212
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.version(), Some("v1"));
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let file_config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };

        self.merge_config(file_config);
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`.
    /// For example, with prefix "APIFEST":
    /// - `APIFEST__MAPPING__VERSION=v2`
    /// - `APIFEST__BACKEND__PORT=8080`
    /// - `APIFEST__ANNOTATIONS=com.example.Custom:value`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Override the requested output modes.
    ///
    /// Applied after every other layer.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_config::{ConfigLoader, OutputMode};
    ///
    /// let config = ConfigLoader::new()
    ///     .with_modes(vec![OutputMode::Doc])
    ///     .load_unvalidated();
    ///
    /// assert_eq!(config.mapping.mode, vec![OutputMode::Doc]);
    /// ```
    #[must_use]
    pub fn with_modes(mut self, modes: Vec<OutputMode>) -> Self {
        self.mode_override = Some(modes);
        self
    }

    /// Load a `.env` file for environment variables.
    ///
    /// Uses `dotenvy` to locate `.env` in the current directory or one of its
    /// parents. A missing file is not an error. The variables join the
    /// environment override layer and never replace variables already set in
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    /// Nothing from a malformed file is applied.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv_iter() {
            Ok(entries) => self.with_dotenv_entries(entries),
            Err(err) if err.not_found() => Ok(self),
            Err(err) => Err(ConfigError::env_file(err.to_string())),
        }
    }

    /// Load environment variables from a specific `.env` file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable or malformed.
    pub fn with_dotenv_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path).map_err(|err| {
            if err.not_found() {
                ConfigError::file_not_found(path)
            } else {
                ConfigError::env_file(format!("{}: {err}", path.display()))
            }
        })?;
        self.with_dotenv_entries(entries)
    }

    fn with_dotenv_entries<I>(mut self, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
    {
        let entries = entries
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ConfigError::env_file(err.to_string()))?;
        self.dotenv.extend(entries);
        Ok(self)
    }

    /// Returns `true` once a configuration file has been loaded.
    #[must_use]
    pub fn file_loaded(&self) -> bool {
        self.file_loaded
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set), then the
    /// explicit overrides, and validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Environment variable parsing fails
    /// - Configuration validation fails
    pub fn load(self) -> Result<ApifestConfig, ConfigError> {
        let config = self.resolve()?;
        config.validate()?;
        Ok(config)
    }

    /// Finalize without validation or environment overrides.
    ///
    /// Use this if you want to inspect or modify the configuration
    /// before validation.
    #[must_use]
    pub fn load_unvalidated(mut self) -> ApifestConfig {
        if let Some(modes) = self.mode_override.take() {
            self.config.mapping.mode = modes;
        }
        self.config
    }

    fn resolve(mut self) -> Result<ApifestConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        if let Some(modes) = self.mode_override.take() {
            self.config.mapping.mode = modes;
        }

        Ok(self.config)
    }

    // Parse configuration file based on extension
    fn parse_file(content: &str, path: &Path) -> Result<ApifestConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    // Sections absent from the file keep their serde defaults, so a full
    // replace preserves defaults for unset fields.
    fn merge_config(&mut self, file_config: ApifestConfig) {
        self.config = file_config;
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let dotenv = std::mem::take(&mut self.dotenv);
        let env_vars = collect_overrides(dotenv, env::vars(), prefix);

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            // Mapping section
            ["MAPPING", "VERSION"] => {
                self.config.mapping.version = optional(value);
            }
            ["MAPPING", "MODE"] => {
                self.config.mapping.mode = OutputMode::parse_list(value)
                    .map_err(|_| ConfigError::env_parse_error(key, "expected 'mapping', 'doc' or both"))?;
            }
            ["MAPPING", "FILENAME"] => {
                self.config.mapping.filename = optional(value);
            }
            ["MAPPING", "DOCS_FILENAME"] => {
                self.config.mapping.docs_filename = optional(value);
            }

            // Backend section
            ["BACKEND", "HOST"] => {
                self.config.backend.host = optional(value);
            }
            ["BACKEND", "PORT"] => {
                self.config.backend.port = if value.trim().is_empty() {
                    None
                } else {
                    Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| ConfigError::env_parse_error(key, "expected port number"))?,
                    )
                };
            }

            // Defaults section
            ["DEFAULTS", "ACTION_CLASS"] => {
                self.config.defaults.action_class = optional(value);
            }
            ["DEFAULTS", "FILTER_CLASS"] => {
                self.config.defaults.filter_class = optional(value);
            }
            ["DEFAULTS", "APPLICATION_PATH"] => {
                self.config.defaults.application_path = optional(value);
            }

            // Custom annotations, compact form
            ["ANNOTATIONS"] => {
                let registry = std::mem::take(&mut self.config.annotations);
                self.config.annotations = registry.merge(AnnotationRegistry::parse(value));
            }

            // Logging section
            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected 'json' or 'pretty'"))?;
            }

            // Unknown key - ignore
            _ => {}
        }

        Ok(())
    }
}

/// Selects the `PREFIX__*` variables from `.env` entries and the process
/// environment. The process environment wins over `.env`, and the first
/// occurrence wins within `.env`.
fn collect_overrides<D, P>(dotenv: D, process: P, prefix: &str) -> HashMap<String, String>
where
    D: IntoIterator<Item = (String, String)>,
    P: IntoIterator<Item = (String, String)>,
{
    let key_prefix = format!("{prefix}__");
    let mut env_vars = HashMap::new();
    for (key, value) in dotenv {
        if key.starts_with(&key_prefix) {
            env_vars.entry(key).or_insert(value);
        }
    }
    for (key, value) in process {
        if key.starts_with(&key_prefix) {
            env_vars.insert(key, value);
        }
    }
    env_vars
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
