//! # ApiFest Extract
//!
//! Turns method descriptors into assembled endpoints.
//!
//! Every stage is a pure function over in-memory structures:
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Tag scanning | [`scanner`] | Split a raw doc comment into block tags |
//! | Path variables | [`path_vars`] | Attach regex constraints to `{name}` placeholders |
//! | Annotations | [`annotations`] | HTTP verb markers and custom properties |
//! | Parameters | [`params`] | Request/result parameter and exception groups |
//! | Assembly | [`assembler`] | Build the routing and documentation records |
//! | Ordering | [`order`] | Stable documentation order |
//!
//! ## Example
//!
//! ```rust
//! use apifest_core::{AnnotationDescriptor, MethodDescriptor};
//! use apifest_extract::{AssemblerSettings, EndpointAssembler};
//!
//! let assembler = EndpointAssembler::new(
//!     AssemblerSettings::new("v1").with_backend("localhost", 8080),
//! );
//! let method = MethodDescriptor::new("getUser")
//!     .doc("/**\n * @apifest.external /users/{id}\n * @apifest.internal /users/{id}\n * @apifest.re.id \\d+\n */")
//!     .annotation(AnnotationDescriptor::new("javax.ws.rs.GET"));
//!
//! let endpoint = assembler.assemble(&method).unwrap().unwrap();
//! assert_eq!(endpoint.routing.external_path, "/v1/users/{id}");
//! assert_eq!(endpoint.routing.path_variables.names().as_deref(), Some("id"));
//! ```

#![doc(html_root_url = "https://docs.rs/apifest-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod annotations;
pub mod assembler;
pub mod order;
pub mod params;
pub mod path_vars;
pub mod scanner;

#[cfg(test)]
mod test_support;

pub use annotations::{classify, ClassifiedAnnotations};
pub use assembler::{AssemblerSettings, EndpointAssembler};
pub use order::{parse_order, sort_endpoints};
pub use path_vars::resolve_path_variables;
pub use scanner::{collect_tags, scan_doc};
