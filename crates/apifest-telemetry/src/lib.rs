//! Structured logging for ApiFest.
//!
//! Every crate of the workspace emits `tracing` events; this crate installs
//! the subscriber that renders them. The generator binary initializes it once
//! from the `[logging]` configuration section.
//!
//! Events are written to stderr, either as JSON lines or in a human-readable
//! pretty format, filtered by an `EnvFilter` directive such as `info` or
//! `apifest_extract=debug`.
//!
//! # Example
//!
//! ```rust,ignore
//! use apifest_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! let config = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! init_logging(&config)?;
//!
//! tracing::info!(endpoints = 2, "wrote mapping");
//! ```

#![doc(html_root_url = "https://docs.rs/apifest-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
