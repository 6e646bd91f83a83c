//! # ApiFest Core
//!
//! Core types shared by every stage of the ApiFest mapping generator.
//!
//! This crate provides the foundational types used throughout ApiFest:
//!
//! - [`TagIndex`] - First-wins name to text lookup over a method's block tags
//! - [`MethodDescriptor`] / [`MethodSet`] - Methods handed over by the source-analysis collaborator
//! - [`AnnotationRegistry`] - Which custom annotation attributes become custom properties
//! - [`RoutingEndpoint`] / [`DocumentationEndpoint`] - The two views of one assembled endpoint
//! - [`ApifestError`] - Standard error type

#![doc(html_root_url = "https://docs.rs/apifest-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod descriptor;
mod error;
pub mod model;
pub mod registry;
pub mod tags;

pub use descriptor::{AnnotationDescriptor, AttributeValue, MethodDescriptor, MethodSet};
pub use error::{ApifestError, ApifestResult};
pub use model::{
    AuthType, DocumentationEndpoint, ExceptionDoc, HttpMethod, ParsedEndpoint, PathVariable,
    PathVariables, RequestParamDoc, ResultParamDoc, RoutingEndpoint, ORDER_LAST,
};
pub use registry::AnnotationRegistry;
pub use tags::{keys, RawTag, TagIndex, TAG_MARKER};
