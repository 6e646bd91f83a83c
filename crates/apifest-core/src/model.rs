//! The endpoint model produced by assembly.
//!
//! Every externally exposed method yields a [`ParsedEndpoint`]: a
//! [`RoutingEndpoint`] for the gateway and a [`DocumentationEndpoint`] for the
//! docs renderer, built in lockstep from the same tags.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order value of endpoints without an explicit (or with an invalid) order.
pub const ORDER_LAST: i32 = i32::MAX;

/// HTTP methods recognized as verb annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// All recognized methods.
    pub const ALL: [Self; 6] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Returns the method named by an annotation's simple name, if any.
    ///
    /// Matching is exact: `GET` is a verb marker, `Get` is not.
    #[must_use]
    pub fn from_marker(simple_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == simple_name)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication type required by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// An end user token is required.
    #[serde(rename = "user")]
    User,
    /// A client application token is sufficient.
    #[serde(rename = "client-app")]
    ClientApp,
}

impl AuthType {
    /// Parses the exact tag value, `user` or `client-app`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "client-app" => Some(Self::ClientApp),
            _ => None,
        }
    }

    /// Returns the tag value form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::ClientApp => "client-app",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path placeholder with its declared regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathVariable {
    /// Placeholder name, without braces.
    pub name: String,
    /// Regular expression constraining the placeholder.
    pub expression: String,
}

/// Constrained path variables in discovery order.
///
/// Kept as explicit pairs; the legacy space-joined encoding is produced only
/// by [`PathVariables::names`] and [`PathVariables::expressions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVariables(Vec<PathVariable>);

impl PathVariables {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a variable.
    pub fn push(&mut self, name: impl Into<String>, expression: impl Into<String>) {
        self.0.push(PathVariable {
            name: name.into(),
            expression: expression.into(),
        });
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no placeholder had a constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the variables.
    pub fn iter(&self) -> impl Iterator<Item = &PathVariable> {
        self.0.iter()
    }

    /// Space-joined names, or `None` when empty.
    #[must_use]
    pub fn names(&self) -> Option<String> {
        self.joined(|var| &var.name)
    }

    /// Space-joined expressions, parallel to [`PathVariables::names`].
    #[must_use]
    pub fn expressions(&self) -> Option<String> {
        self.joined(|var| &var.expression)
    }

    fn joined(&self, field: impl Fn(&PathVariable) -> &String) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .iter()
                .map(|var| field(var).as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

impl FromIterator<PathVariable> for PathVariables {
    fn from_iter<T: IntoIterator<Item = PathVariable>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One externally reachable route, as consumed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEndpoint {
    /// Versioned external path.
    pub external_path: String,
    /// Backend path, including the application path prefix.
    pub internal_path: Option<String>,
    /// HTTP method, from a verb annotation.
    pub method: Option<HttpMethod>,
    /// Required authentication type.
    pub auth_type: Option<AuthType>,
    /// Authorization scope.
    pub scope: Option<String>,
    /// Backend host (override or default).
    pub backend_host: Option<String>,
    /// Backend port (override or default).
    pub backend_port: Option<u16>,
    /// Constrained path variables.
    pub path_variables: PathVariables,
    /// Action class name.
    pub action: Option<String>,
    /// Filter class name.
    pub filter: Option<String>,
    /// Extracted custom annotation attributes.
    pub custom_properties: IndexMap<String, String>,
    /// Excluded from the routing document.
    pub hidden: bool,
}

impl RoutingEndpoint {
    /// Creates a routing record for the given versioned external path.
    #[must_use]
    pub fn new(external_path: impl Into<String>) -> Self {
        Self {
            external_path: external_path.into(),
            internal_path: None,
            method: None,
            auth_type: None,
            scope: None,
            backend_host: None,
            backend_port: None,
            path_variables: PathVariables::new(),
            action: None,
            filter: None,
            custom_properties: IndexMap::new(),
            hidden: false,
        }
    }
}

/// A documented request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParamDoc {
    /// Public parameter name.
    pub name: String,
    /// Parameter type.
    pub param_type: Option<String>,
    /// Description.
    pub description: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Example value.
    pub example_value: Option<String>,
}

/// A documented result field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultParamDoc {
    /// Public field name.
    pub name: String,
    /// Field type.
    pub param_type: Option<String>,
    /// Description.
    pub description: String,
    /// Whether the field is always present.
    pub required: bool,
}

/// A documented error condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionDoc {
    /// Exception name.
    pub name: String,
    /// When the exception is raised.
    pub condition: String,
    /// Description.
    pub description: Option<String>,
    /// HTTP status code.
    pub code: Option<i32>,
}

/// The human-facing counterpart of a [`RoutingEndpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationEndpoint {
    /// Versioned external path.
    pub endpoint: String,
    /// HTTP method.
    pub method: Option<HttpMethod>,
    /// Authorization scope.
    pub scope: Option<String>,
    /// Documentation group.
    pub group: Option<String>,
    /// One line summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Example request.
    pub example_request: Option<String>,
    /// Example result.
    pub example_result: Option<String>,
    /// Text introducing the request parameters.
    pub params_description: Option<String>,
    /// Text introducing the result parameters.
    pub results_description: Option<String>,
    /// Request parameters.
    pub request_params: Vec<RequestParamDoc>,
    /// Result fields.
    pub result_params: Vec<ResultParamDoc>,
    /// Error conditions.
    pub exceptions: Vec<ExceptionDoc>,
    /// Position in the documentation, [`ORDER_LAST`] when unordered.
    pub order: i32,
    /// Excluded from the documentation document.
    pub hidden: bool,
    /// Constrained path variables.
    pub path_variables: PathVariables,
    /// Extracted custom annotation attributes.
    pub custom_properties: IndexMap<String, String>,
}

impl DocumentationEndpoint {
    /// Creates a documentation record for the given versioned external path.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: None,
            scope: None,
            group: None,
            summary: None,
            description: None,
            example_request: None,
            example_result: None,
            params_description: None,
            results_description: None,
            request_params: Vec::new(),
            result_params: Vec::new(),
            exceptions: Vec::new(),
            order: ORDER_LAST,
            hidden: false,
            path_variables: PathVariables::new(),
            custom_properties: IndexMap::new(),
        }
    }
}

/// Both views of one assembled endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEndpoint {
    /// Routing view.
    pub routing: RoutingEndpoint,
    /// Documentation view.
    pub documentation: DocumentationEndpoint,
}

impl ParsedEndpoint {
    /// Returns the documentation order.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.documentation.order
    }

    /// Returns the versioned external path.
    #[must_use]
    pub fn external_path(&self) -> &str {
        &self.routing.external_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_markers() {
        assert_eq!(HttpMethod::from_marker("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_marker("OPTIONS"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::from_marker("Get"), None);
        assert_eq!(HttpMethod::from_marker("PATCH"), None);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_serde() {
        assert_eq!(serde_json::to_string(&HttpMethod::Head).unwrap(), "\"HEAD\"");
    }

    #[test]
    fn test_auth_type_exact_values() {
        assert_eq!(AuthType::parse("user"), Some(AuthType::User));
        assert_eq!(AuthType::parse("client-app"), Some(AuthType::ClientApp));
        assert_eq!(AuthType::parse("User"), None);
        assert_eq!(AuthType::parse(""), None);
        assert_eq!(
            serde_json::to_string(&AuthType::ClientApp).unwrap(),
            "\"client-app\""
        );
    }

    #[test]
    fn test_path_variables_encoding() {
        let mut vars = PathVariables::new();
        assert_eq!(vars.names(), None);
        assert_eq!(vars.expressions(), None);

        vars.push("platform", "\\w+");
        vars.push("clientId", "\\d+");
        assert_eq!(vars.names().as_deref(), Some("platform clientId"));
        assert_eq!(vars.expressions().as_deref(), Some("\\w+ \\d+"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_new_records_defaults() {
        let doc = DocumentationEndpoint::new("/v1/x");
        assert_eq!(doc.order, ORDER_LAST);
        assert!(!doc.hidden);
        assert!(doc.request_params.is_empty());

        let routing = RoutingEndpoint::new("/v1/x");
        assert!(!routing.hidden);
        assert!(routing.custom_properties.is_empty());

        let endpoint = ParsedEndpoint {
            routing,
            documentation: doc,
        };
        assert_eq!(endpoint.order(), ORDER_LAST);
        assert_eq!(endpoint.external_path(), "/v1/x");
    }
}
