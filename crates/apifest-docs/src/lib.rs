//! # ApiFest Docs
//!
//! The two output documents of the ApiFest mapping generator.
//!
//! This crate provides:
//! - **Routing mapping** consumed by the API gateway ([`MappingGenerator`])
//! - **Endpoint documentation** consumed by the docs renderer ([`DocumentationGenerator`])
//!
//! Both are rendered as pretty-printed JSON. Endpoints hidden in a view are
//! left out of that view's document only.
//!
//! ## Quick Start
//!
//! ```rust
//! use apifest_docs::{DocumentationGenerator, MappingGenerator};
//!
//! let endpoints = Vec::new();
//!
//! let mapping = MappingGenerator::new()
//!     .version("v1")
//!     .backend("localhost", 8080)
//!     .generate_json(&endpoints)
//!     .unwrap();
//! assert!(mapping.contains("\"endpoints\": []"));
//!
//! let docs = DocumentationGenerator::new()
//!     .version("v1")
//!     .generate(&endpoints)
//!     .unwrap();
//! assert!(docs.endpoints.is_empty());
//! ```

mod documentation;
mod error;
mod mapping;

pub use documentation::{
    DocumentationGenerator, EndpointDocumentation, ExceptionDocumentation, MappingDocumentation,
    RequestParamDocumentation, ResultParamDocumentation,
};
pub use error::{DocsError, DocsResult};
pub use mapping::{
    Backend, MappingAction, MappingConfig, MappingEndpoint, MappingGenerator, ResponseFilter,
};

use std::path::Path;

/// Writes a complete rendered document in a single write.
fn write_document(path: &Path, content: &str) -> DocsResult<()> {
    std::fs::write(path, content).map_err(|source| DocsError::WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}
