//! Routing mapping document.
//!
//! The gateway consumes one versioned mapping per run listing every
//! non-hidden [`RoutingEndpoint`].

use crate::error::{DocsError, DocsResult};
use apifest_core::{AuthType, HttpMethod, ParsedEndpoint, RoutingEndpoint};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The complete routing mapping document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Mapping version.
    pub version: String,
    /// Default backend.
    pub backend: Backend,
    /// Routed endpoints.
    #[serde(default)]
    pub endpoints: Vec<MappingEndpoint>,
}

/// Default backend of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    /// Host name.
    pub host: String,
    /// Port.
    pub port: u16,
}

/// Action hook reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingAction {
    /// Action class name.
    #[serde(rename = "actionClassName")]
    pub action_class_name: String,
}

/// Response filter reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFilter {
    /// Filter class name.
    #[serde(rename = "filterClassName")]
    pub filter_class_name: String,
}

/// One routed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEndpoint {
    /// Versioned external path.
    pub external_endpoint: String,
    /// Backend path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_endpoint: Option<String>,
    /// HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Authentication type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    /// Authorization scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Space-joined path variable names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_name: Option<String>,
    /// Space-joined path variable expressions, parallel to `var_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_expression: Option<String>,
    /// Backend host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_host: Option<String>,
    /// Backend port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_port: Option<u16>,
    /// Action hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MappingAction>,
    /// Response filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ResponseFilter>,
    /// Custom annotation properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_properties: IndexMap<String, String>,
    /// Hidden flag; always `false` in emitted documents.
    #[serde(default)]
    pub hidden: bool,
}

impl From<&RoutingEndpoint> for MappingEndpoint {
    fn from(endpoint: &RoutingEndpoint) -> Self {
        Self {
            external_endpoint: endpoint.external_path.clone(),
            internal_endpoint: endpoint.internal_path.clone(),
            method: endpoint.method,
            auth_type: endpoint.auth_type,
            scope: endpoint.scope.clone(),
            var_name: endpoint.path_variables.names(),
            var_expression: endpoint.path_variables.expressions(),
            backend_host: endpoint.backend_host.clone(),
            backend_port: endpoint.backend_port,
            action: endpoint.action.clone().map(|action_class_name| MappingAction {
                action_class_name,
            }),
            filters: endpoint.filter.clone().map(|filter_class_name| ResponseFilter {
                filter_class_name,
            }),
            custom_properties: endpoint.custom_properties.clone(),
            hidden: endpoint.hidden,
        }
    }
}

/// Routing mapping generator.
#[derive(Debug, Clone, Default)]
pub struct MappingGenerator {
    version: Option<String>,
    backend_host: Option<String>,
    backend_port: Option<u16>,
}

impl MappingGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mapping version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the default backend.
    #[must_use]
    pub fn backend(mut self, host: impl Into<String>, port: u16) -> Self {
        self.backend_host = Some(host.into());
        self.backend_port = Some(port);
        self
    }

    /// Build the mapping document from ordered endpoints.
    pub fn generate(&self, endpoints: &[ParsedEndpoint]) -> DocsResult<MappingConfig> {
        let version = self
            .version
            .clone()
            .ok_or_else(|| DocsError::missing_field("version"))?;
        let host = self
            .backend_host
            .clone()
            .ok_or_else(|| DocsError::missing_field("backend.host"))?;
        let port = self
            .backend_port
            .ok_or_else(|| DocsError::missing_field("backend.port"))?;

        let endpoints = endpoints
            .iter()
            .map(|endpoint| &endpoint.routing)
            .filter(|routing| !routing.hidden)
            .map(MappingEndpoint::from)
            .collect();

        Ok(MappingConfig {
            version,
            backend: Backend { host, port },
            endpoints,
        })
    }

    /// Render the mapping document as pretty-printed JSON.
    pub fn generate_json(&self, endpoints: &[ParsedEndpoint]) -> DocsResult<String> {
        let mapping = self.generate(endpoints)?;
        Ok(serde_json::to_string_pretty(&mapping)?)
    }

    /// Render the mapping document and write it to `path`.
    pub fn write(&self, endpoints: &[ParsedEndpoint], path: impl AsRef<Path>) -> DocsResult<()> {
        let json = self.generate_json(endpoints)?;
        crate::write_document(path.as_ref(), &json)
    }
}
