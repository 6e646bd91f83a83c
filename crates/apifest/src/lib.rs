//! # ApiFest
//!
//! **Routing mapping and endpoint documentation from API doc tags**
//!
//! ApiFest reads `apifest.*` tags and HTTP verb annotations from the methods of
//! a REST resource and produces two documents:
//!
//! - a **routing mapping** consumed by the ApiFest gateway (external path to
//!   internal path, backend, scope, auth type, action and filter)
//! - an **endpoint documentation** document consumed by the docs renderer
//!   (group, summary, request/result parameters, exceptions)
//!
//! ## Quick Start
//!
//! ```rust
//! use apifest::{ApifestConfig, Generator, MethodDescriptor, MethodSet};
//!
//! let config = ApifestConfig::builder()
//!     .version("v1")
//!     .backend("localhost", 1212)
//!     .filename("all-mappings.json")
//!     .build();
//!
//! let methods = MethodSet::new(vec![MethodDescriptor::new("getMetrics")
//!     .tag("apifest.external", "/twitter/followers/metrics")
//!     .tag("apifest.internal", "/twitter/followers/metrics")
//!     .tag("apifest.scope", "twitter_followers")]);
//!
//! let endpoints = Generator::from_config(config).unwrap().assemble(&methods).unwrap();
//! assert_eq!(endpoints[0].external_path(), "/v1/twitter/followers/metrics");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! methods.json → scan doc tags → TagIndex → EndpointAssembler → sort by order
//!                                                                   ↓
//!                       all-mappings.json ← MappingGenerator ←──────┤
//!                  all-mappings-docs.json ← DocumentationGenerator ←┘
//! ```

#![doc(html_root_url = "https://docs.rs/apifest/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod generator;

// Re-export the workspace crates
pub use apifest_config as config;
pub use apifest_core as core;
pub use apifest_docs as docs;
pub use apifest_extract as extract;
pub use apifest_telemetry as telemetry;

pub use apifest_config::{ApifestConfig, ConfigError, ConfigLoader, OutputMode};
pub use apifest_core::{ApifestError, MethodDescriptor, MethodSet, ParsedEndpoint};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{Generator, RunSummary};

/// Generator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "APIFEST";

/// Configuration file read when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "apifest.toml";
