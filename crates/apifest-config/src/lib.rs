//! Typed configuration for the ApiFest mapping generator.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields and unknown output modes)
//! - Layered configuration (defaults → file → env → explicit overrides)
//!
//! # Overview
//!
//! The configuration system is built around the [`ApifestConfig`] struct:
//!
//! - [`MappingSection`] - Version, requested documents and output file names
//! - [`BackendSection`] - Default backend host and port
//! - [`DefaultsSection`] - Default action, filter and application path
//! - [`apifest_core::AnnotationRegistry`] - Custom annotations to extract
//! - [`LoggingSection`] - Log level and format
//!
//! # Example
//!
//! ```no_run
//! use apifest_config::ConfigLoader;
//!
//! # fn main() -> Result<(), apifest_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("apifest.toml")?
//!     .with_env_prefix("APIFEST")
//!     .load()?;
//!
//! println!("Generating mapping {:?}", config.version());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [mapping]
//! version = "v1"
//! mode = ["mapping", "doc"]
//! filename = "all-mappings.json"
//! docs_filename = "all-mappings-docs.json"
//!
//! [backend]
//! host = "localhost"
//! port = 1212
//!
//! [defaults]
//! action_class = "com.all.mappings.DefaultMapping"
//! filter_class = "com.all.mappings.DefaultFilter"
//! application_path = "/"
//!
//! [annotations]
//! "com.apifest.example.CustomAnnotation" = []
//! "com.apifest.example.Audit" = ["level"]
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Configuration values can be overridden via environment variables using
//! the format `PREFIX__SECTION__KEY`. For example:
//!
//! - `APIFEST__MAPPING__VERSION=v2`
//! - `APIFEST__MAPPING__MODE=mapping,doc`
//! - `APIFEST__BACKEND__PORT=8080`
//! - `APIFEST__ANNOTATIONS=com.example.Custom,com.example.Audit:level`

#![doc(html_root_url = "https://docs.rs/apifest-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
