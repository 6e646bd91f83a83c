//! Endpoint documentation document.
//!
//! The docs renderer consumes one versioned document per run listing every
//! non-hidden [`DocumentationEndpoint`] in documentation order.

use crate::error::{DocsError, DocsResult};
use apifest_core::{
    DocumentationEndpoint, ExceptionDoc, HttpMethod, ParsedEndpoint, RequestParamDoc,
    ResultParamDoc,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The complete documentation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocumentation {
    /// Mapping version.
    pub version: String,
    /// Documented endpoints, in documentation order.
    #[serde(default)]
    pub endpoints: Vec<EndpointDocumentation>,
}

/// A documented request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParamDocumentation {
    /// Public name.
    pub name: String,
    /// Type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Description.
    pub description: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_value: Option<String>,
}

/// A documented result field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultParamDocumentation {
    /// Public name.
    pub name: String,
    /// Type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Description.
    pub description: String,
    /// Whether the field is always present.
    pub required: bool,
}

/// A documented exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDocumentation {
    /// Exception name.
    pub name: String,
    /// When it is raised.
    pub condition: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

/// One documented endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDocumentation {
    /// Versioned external path.
    pub endpoint: String,
    /// HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Authorization scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Documentation group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// One line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_request: Option<String>,
    /// Example result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_result: Option<String>,
    /// Text introducing the request parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_description: Option<String>,
    /// Text introducing the result fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_description: Option<String>,
    /// Request parameters.
    #[serde(default)]
    pub request_params: Vec<RequestParamDocumentation>,
    /// Result fields.
    #[serde(default)]
    pub result_params: Vec<ResultParamDocumentation>,
    /// Exceptions.
    #[serde(default)]
    pub exceptions: Vec<ExceptionDocumentation>,
    /// Documentation order.
    pub order: i32,
    /// Hidden flag; always `false` in emitted documents.
    #[serde(default)]
    pub hidden: bool,
    /// Space-joined path variable names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_name: Option<String>,
    /// Space-joined path variable expressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_expression: Option<String>,
    /// Custom annotation properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_properties: IndexMap<String, String>,
}

impl From<&RequestParamDoc> for RequestParamDocumentation {
    fn from(param: &RequestParamDoc) -> Self {
        Self {
            name: param.name.clone(),
            param_type: param.param_type.clone(),
            description: param.description.clone(),
            required: param.required,
            example_value: param.example_value.clone(),
        }
    }
}

impl From<&ResultParamDoc> for ResultParamDocumentation {
    fn from(param: &ResultParamDoc) -> Self {
        Self {
            name: param.name.clone(),
            param_type: param.param_type.clone(),
            description: param.description.clone(),
            required: param.required,
        }
    }
}

impl From<&ExceptionDoc> for ExceptionDocumentation {
    fn from(exception: &ExceptionDoc) -> Self {
        Self {
            name: exception.name.clone(),
            condition: exception.condition.clone(),
            description: exception.description.clone(),
            code: exception.code,
        }
    }
}

impl From<&DocumentationEndpoint> for EndpointDocumentation {
    fn from(doc: &DocumentationEndpoint) -> Self {
        Self {
            endpoint: doc.endpoint.clone(),
            method: doc.method,
            scope: doc.scope.clone(),
            group: doc.group.clone(),
            summary: doc.summary.clone(),
            description: doc.description.clone(),
            example_request: doc.example_request.clone(),
            example_result: doc.example_result.clone(),
            params_description: doc.params_description.clone(),
            results_description: doc.results_description.clone(),
            request_params: doc.request_params.iter().map(Into::into).collect(),
            result_params: doc.result_params.iter().map(Into::into).collect(),
            exceptions: doc.exceptions.iter().map(Into::into).collect(),
            order: doc.order,
            hidden: doc.hidden,
            var_name: doc.path_variables.names(),
            var_expression: doc.path_variables.expressions(),
            custom_properties: doc.custom_properties.clone(),
        }
    }
}

/// Documentation generator.
#[derive(Debug, Clone, Default)]
pub struct DocumentationGenerator {
    version: Option<String>,
}

impl DocumentationGenerator {
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

    /// Build the documentation document from ordered endpoints.
    pub fn generate(&self, endpoints: &[ParsedEndpoint]) -> DocsResult<MappingDocumentation> {
        let version = self
            .version
            .clone()
            .ok_or_else(|| DocsError::missing_field("version"))?;

        let endpoints = endpoints
            .iter()
            .map(|endpoint| &endpoint.documentation)
            .filter(|doc| !doc.hidden)
            .map(EndpointDocumentation::from)
            .collect();

        Ok(MappingDocumentation { version, endpoints })
    }

    /// Render the documentation document as pretty-printed JSON.
    pub fn generate_json(&self, endpoints: &[ParsedEndpoint]) -> DocsResult<String> {
        let documentation = self.generate(endpoints)?;
        Ok(serde_json::to_string_pretty(&documentation)?)
    }

    /// Render the documentation document and write it to `path`.
    pub fn write(&self, endpoints: &[ParsedEndpoint], path: impl AsRef<Path>) -> DocsResult<()> {
        let json = self.generate_json(endpoints)?;
        crate::write_document(path.as_ref(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apifest_core::{RoutingEndpoint, ORDER_LAST};

    fn endpoint(documentation: DocumentationEndpoint) -> ParsedEndpoint {
        ParsedEndpoint {
            routing: RoutingEndpoint::new(documentation.endpoint.clone()),
            documentation,
        }
    }

    fn generator() -> DocumentationGenerator {
        DocumentationGenerator::new().version("v1")
    }

    #[test]
    fn test_full_endpoint_fields() {
        let mut doc = DocumentationEndpoint::new("/v1/twitter/followers/metrics");
        doc.method = Some(HttpMethod::Get);
        doc.scope = Some("twitter_followers".to_string());
        doc.group = Some("Twitter Followers".to_string());
        doc.summary = Some("Short".to_string());
        doc.order = 2;
        doc.request_params.push(RequestParamDoc {
            name: "ids".to_string(),
            param_type: Some("string".to_string()),
            description: "Ids".to_string(),
            required: true,
            example_value: None,
        });
        doc.result_params.push(ResultParamDoc {
            name: "sentiment.score".to_string(),
            param_type: Some("float".to_string()),
            description: "Score".to_string(),
            required: false,
        });
        doc.exceptions.push(ExceptionDoc {
            name: "invalid_parameter".to_string(),
            condition: "The parameter is invalid".to_string(),
            description: Some("Please add valid parameter".to_string()),
            code: Some(400),
        });

        let value = serde_json::to_value(generator().generate(&[endpoint(doc)]).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "version": "v1",
                "endpoints": [{
                    "endpoint": "/v1/twitter/followers/metrics",
                    "method": "GET",
                    "scope": "twitter_followers",
                    "group": "Twitter Followers",
                    "summary": "Short",
                    "requestParams": [
                        { "name": "ids", "type": "string", "description": "Ids", "required": true }
                    ],
                    "resultParams": [
                        { "name": "sentiment.score", "type": "float", "description": "Score", "required": false }
                    ],
                    "exceptions": [{
                        "name": "invalid_parameter",
                        "condition": "The parameter is invalid",
                        "description": "Please add valid parameter",
                        "code": 400
                    }],
                    "order": 2,
                    "hidden": false
                }]
            })
        );
    }

    #[test]
    fn test_lists_always_present() {
        let json = generator()
            .generate_json(&[endpoint(DocumentationEndpoint::new("/v1/bare"))])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value["endpoints"][0];
        assert_eq!(entry["requestParams"], serde_json::json!([]));
        assert_eq!(entry["resultParams"], serde_json::json!([]));
        assert_eq!(entry["exceptions"], serde_json::json!([]));
        assert_eq!(entry["order"], serde_json::json!(ORDER_LAST));
        assert!(entry.get("customProperties").is_none());
        assert!(entry.get("varName").is_none());
    }

    #[test]
    fn test_hidden_docs_are_excluded() {
        let mut hidden = DocumentationEndpoint::new("/v1/hidden");
        hidden.hidden = true;
        let docs = generator()
            .generate(&[endpoint(hidden), endpoint(DocumentationEndpoint::new("/v1/shown"))])
            .unwrap();
        assert_eq!(docs.endpoints.len(), 1);
        assert_eq!(docs.endpoints[0].endpoint, "/v1/shown");
    }

    #[test]
    fn test_routing_hidden_does_not_hide_docs() {
        let mut parsed = endpoint(DocumentationEndpoint::new("/v1/x"));
        parsed.routing.hidden = true;
        let docs = generator().generate(&[parsed]).unwrap();
        assert_eq!(docs.endpoints.len(), 1);
    }

    #[test]
    fn test_missing_version() {
        let err = DocumentationGenerator::new().generate(&[]).unwrap_err();
        assert!(matches!(err, DocsError::MissingField { .. }));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all-mappings-docs.json");
        generator()
            .write(&[endpoint(DocumentationEndpoint::new("/v1/x"))], &path)
            .unwrap();
        let docs: MappingDocumentation =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(docs.endpoints[0].endpoint, "/v1/x");
        assert_eq!(docs.endpoints[0].order, ORDER_LAST);
    }
}
