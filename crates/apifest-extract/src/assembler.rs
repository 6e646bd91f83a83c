//! Endpoint assembly.
//!
//! [`EndpointAssembler`] turns the tags and annotations of one method into a
//! [`ParsedEndpoint`], or nothing when the method carries no
//! `apifest.external` tag. All run-wide defaults live in an explicit
//! [`AssemblerSettings`] value.

use crate::annotations::classify;
use crate::order::{parse_order, sort_endpoints};
use crate::params::{exceptions, request_params, result_params};
use crate::path_vars::resolve_path_variables;
use crate::scanner::collect_tags;
use apifest_core::{
    keys, AnnotationDescriptor, AnnotationRegistry, ApifestError, ApifestResult, AuthType,
    DocumentationEndpoint, MethodDescriptor, ParsedEndpoint, RoutingEndpoint, TagIndex,
};
use tracing::{debug, warn};

/// Tag value that suppresses the default action.
const NO_ACTION: &str = "None";

/// Run-wide defaults applied while assembling endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblerSettings {
    /// Mapping version, prefixed to every external path.
    pub version: String,
    /// Default backend host.
    pub backend_host: Option<String>,
    /// Default backend port.
    pub backend_port: Option<u16>,
    /// Default action class name.
    pub default_action: Option<String>,
    /// Default filter class name.
    pub default_filter: Option<String>,
    /// Prefix for internal paths; empty, `null` and `none` mean no prefix.
    pub application_path: Option<String>,
    /// Custom annotation extraction registry.
    pub annotations: AnnotationRegistry,
}

impl AssemblerSettings {
    /// Creates settings for the given mapping version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Sets the default backend.
    #[must_use]
    pub fn with_backend(mut self, host: impl Into<String>, port: u16) -> Self {
        self.backend_host = Some(host.into());
        self.backend_port = Some(port);
        self
    }

    /// Sets the default action class.
    #[must_use]
    pub fn with_default_action(mut self, action: impl Into<String>) -> Self {
        self.default_action = Some(action.into());
        self
    }

    /// Sets the default filter class.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = Some(filter.into());
        self
    }

    /// Sets the application path prefix.
    #[must_use]
    pub fn with_application_path(mut self, path: impl Into<String>) -> Self {
        self.application_path = Some(path.into());
        self
    }

    /// Sets the custom annotation registry.
    #[must_use]
    pub fn with_annotations(mut self, annotations: AnnotationRegistry) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns the effective application path prefix.
    #[must_use]
    pub fn application_prefix(&self) -> &str {
        match self.application_path.as_deref().map(str::trim) {
            Some(path)
                if !path.is_empty()
                    && !path.eq_ignore_ascii_case("null")
                    && !path.eq_ignore_ascii_case("none") =>
            {
                path
            }
            _ => "",
        }
    }

    fn external_path(&self, external: &str) -> String {
        format!("/{}{}", self.version, external.trim())
    }
}

/// Builds routing and documentation records from method declarations.
#[derive(Debug, Clone)]
pub struct EndpointAssembler {
    settings: AssemblerSettings,
}

impl EndpointAssembler {
    /// Creates an assembler with the given settings.
    #[must_use]
    pub fn new(settings: AssemblerSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &AssemblerSettings {
        &self.settings
    }

    /// Assembles one method.
    ///
    /// Returns `Ok(None)` when the method is not externally exposed.
    pub fn assemble(&self, method: &MethodDescriptor) -> ApifestResult<Option<ParsedEndpoint>> {
        let tags = TagIndex::from_tags(&collect_tags(method));
        self.assemble_tags(&tags, &method.annotations)
    }

    /// Assembles one endpoint from an already built tag index.
    pub fn assemble_tags(
        &self,
        tags: &TagIndex,
        annotations: &[AnnotationDescriptor],
    ) -> ApifestResult<Option<ParsedEndpoint>> {
        let Some(external) = tags.get(keys::EXTERNAL) else {
            return Ok(None);
        };
        let external_path = self.settings.external_path(external);
        let mut routing = RoutingEndpoint::new(external_path.clone());
        let mut documentation = DocumentationEndpoint::new(external_path.clone());

        if let Some(internal) = tags.get(keys::INTERNAL) {
            routing.internal_path = Some(format!("{}{internal}", self.settings.application_prefix()));
            let variables = resolve_path_variables(internal, tags);
            documentation.path_variables = variables.clone();
            routing.path_variables = variables;
        }

        apply_descriptive_tags(tags, &mut documentation);

        if let Some(scope) = tags.get(keys::SCOPE) {
            routing.scope = Some(scope.to_string());
            documentation.scope = Some(scope.to_string());
        }

        routing.action = match tags.get(keys::ACTION) {
            Some(action) if action.trim() == NO_ACTION => None,
            Some(action) => Some(action.to_string()),
            None => self.settings.default_action.clone(),
        };
        routing.filter = tags
            .get(keys::FILTER)
            .map(str::to_string)
            .or_else(|| self.settings.default_filter.clone());

        if let Some(auth_type) = tags.get(keys::AUTH_TYPE) {
            let parsed = AuthType::parse(auth_type)
                .ok_or_else(|| ApifestError::unsupported_value(keys::AUTH_TYPE, auth_type))?;
            routing.auth_type = Some(parsed);
        }

        let (backend_host, backend_port) = self.resolve_backend(tags, &external_path);
        routing.backend_host = backend_host;
        routing.backend_port = backend_port;

        routing.hidden = tags.contains(keys::HIDDEN);
        documentation.hidden = tags.contains(keys::DOCS_HIDDEN);

        let classified = classify(annotations, &self.settings.annotations);
        routing.method = classified.method;
        documentation.method = classified.method;
        documentation.custom_properties = classified.custom_properties.clone();
        routing.custom_properties = classified.custom_properties;

        documentation.request_params = request_params(tags);
        documentation.result_params = result_params(tags);
        documentation.exceptions = exceptions(tags, &external_path);

        debug!(
            external_path = %external_path,
            method = ?routing.method,
            order = documentation.order,
            routing_hidden = routing.hidden,
            docs_hidden = documentation.hidden,
            "assembled endpoint"
        );

        Ok(Some(ParsedEndpoint {
            routing,
            documentation,
        }))
    }

    /// Assembles every method and returns the endpoints in documentation order.
    ///
    /// Every method is assembled even after a failure; if any failed, the
    /// collected failures are returned together as [`ApifestError::Batch`].
    pub fn assemble_all<'a, I>(&self, methods: I) -> ApifestResult<Vec<ParsedEndpoint>>
    where
        I: IntoIterator<Item = &'a MethodDescriptor>,
    {
        let mut endpoints = Vec::new();
        let mut errors = Vec::new();

        for method in methods {
            match self.assemble(method) {
                Ok(Some(endpoint)) => endpoints.push(endpoint),
                Ok(None) => debug!(method = %method.qualified_name(), "no external endpoint tag, skipping"),
                Err(err) => errors.push(ApifestError::endpoint(endpoint_label(method), err)),
            }
        }

        if !errors.is_empty() {
            return Err(ApifestError::batch(errors));
        }
        sort_endpoints(&mut endpoints);
        Ok(endpoints)
    }

    /// Resolves the backend host and port, falling back to the defaults unless
    /// both overrides are present and the port is valid.
    fn resolve_backend(&self, tags: &TagIndex, external_path: &str) -> (Option<String>, Option<u16>) {
        let defaults = (
            self.settings.backend_host.clone(),
            self.settings.backend_port,
        );
        let (Some(host), Some(port)) = (tags.get(keys::BACKEND_HOST), tags.get(keys::BACKEND_PORT)) else {
            return defaults;
        };
        match port.trim().parse::<u16>() {
            Ok(port) => (Some(host.to_string()), Some(port)),
            Err(_) => {
                warn!(
                    external_path,
                    value = port,
                    "apifest.backend.port for endpoint is not valid, default backend host and port will be used"
                );
                defaults
            }
        }
    }
}

fn apply_descriptive_tags(tags: &TagIndex, documentation: &mut DocumentationEndpoint) {
    let text = |key: &str| tags.get(key).map(str::to_string);

    documentation.description = text(keys::DOCS_DESCRIPTION);
    documentation.summary = text(keys::DOCS_SUMMARY).or_else(|| {
        documentation
            .description
            .as_deref()
            .and_then(derive_summary)
    });
    documentation.group = text(keys::DOCS_GROUP);
    documentation.order = parse_order(tags.get(keys::DOCS_ORDER));
    documentation.example_request = text(keys::DOCS_EXAMPLE_REQUEST);
    documentation.example_result = text(keys::DOCS_EXAMPLE_RESULT);
    documentation.params_description = text(keys::DOCS_PARAMS_DESCRIPTION);
    documentation.results_description = text(keys::DOCS_RESULTS_DESCRIPTION);
}

/// Text before the first sentence terminator, or `None` if that is empty.
fn derive_summary(description: &str) -> Option<String> {
    let first = description
        .split(['.', '?', '!'])
        .next()
        .unwrap_or_default();
    (!first.is_empty()).then(|| first.to_string())
}

fn endpoint_label(method: &MethodDescriptor) -> String {
    TagIndex::from_tags(&collect_tags(method))
        .get(keys::EXTERNAL)
        .map_or_else(|| method.qualified_name(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apifest_core::{AttributeValue, AuthType, HttpMethod, ORDER_LAST};
    use crate::test_support::CapturedLogs;

    fn assembler() -> EndpointAssembler {
        EndpointAssembler::new(AssemblerSettings::new("v1").with_backend("localhost", 1212))
    }

    fn assemble(assembler: &EndpointAssembler, pairs: &[(&str, &str)]) -> ApifestResult<Option<ParsedEndpoint>> {
        let tags: TagIndex = pairs.iter().copied().collect();
        assembler.assemble_tags(&tags, &[])
    }

    fn must(assembler: &EndpointAssembler, pairs: &[(&str, &str)]) -> ParsedEndpoint {
        assemble(assembler, pairs).unwrap().unwrap()
    }

    #[test]
    fn test_no_external_tag_yields_nothing() {
        let result = assemble(&assembler(), &[("apifest.internal", "/x"), ("apifest.scope", "s")]);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_external_path_is_versioned() {
        let endpoint = must(&assembler(), &[("apifest.external", "/twitter/followers/metrics")]);
        assert_eq!(endpoint.routing.external_path, "/v1/twitter/followers/metrics");
        assert_eq!(endpoint.documentation.endpoint, "/v1/twitter/followers/metrics");
        assert_eq!(endpoint.documentation.order, ORDER_LAST);
    }

    #[test]
    fn test_internal_path_with_application_prefix() {
        let assembler = EndpointAssembler::new(
            AssemblerSettings::new("v1").with_application_path("/app"),
        );
        let endpoint = must(
            &assembler,
            &[
                ("apifest.external", "/x/{id}"),
                ("apifest.internal", "/{id}/metrics"),
                ("apifest.re.id", "\\d+"),
            ],
        );
        assert_eq!(endpoint.routing.internal_path.as_deref(), Some("/app/{id}/metrics"));
        assert_eq!(endpoint.routing.path_variables.names().as_deref(), Some("id"));
        assert_eq!(endpoint.documentation.path_variables.expressions().as_deref(), Some("\\d+"));
    }

    #[test]
    fn test_null_application_path_means_no_prefix() {
        for sentinel in ["null", "", "NONE"] {
            let assembler = EndpointAssembler::new(
                AssemblerSettings::new("v1").with_application_path(sentinel),
            );
            let endpoint = must(&assembler, &[("apifest.external", "/x"), ("apifest.internal", "/y")]);
            assert_eq!(endpoint.routing.internal_path.as_deref(), Some("/y"));
        }
    }

    #[test]
    fn test_path_variables_absent_without_constraint() {
        let endpoint = must(
            &assembler(),
            &[("apifest.external", "/e"), ("apifest.internal", "/komfo/{test}/endpoint")],
        );
        assert_eq!(endpoint.routing.path_variables.names(), None);
        assert_eq!(endpoint.routing.path_variables.expressions(), None);

        let endpoint = must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.internal", "/komfo/{test}/endpoint"),
                ("apifest.re.test", "abc"),
            ],
        );
        assert_eq!(endpoint.routing.path_variables.names().as_deref(), Some("test"));
        assert_eq!(endpoint.routing.path_variables.expressions().as_deref(), Some("abc"));
    }

    #[test]
    fn test_action_resolution() {
        let with_default = EndpointAssembler::new(
            AssemblerSettings::new("v1").with_default_action("com.all.mappings.DefaultMapping"),
        );
        let endpoint = must(&with_default, &[("apifest.external", "/e")]);
        assert_eq!(endpoint.routing.action.as_deref(), Some("com.all.mappings.DefaultMapping"));

        let endpoint = must(&with_default, &[("apifest.external", "/e"), ("apifest.action", "None")]);
        assert_eq!(endpoint.routing.action, None);

        let endpoint = must(&with_default, &[("apifest.external", "/e"), ("apifest.action", "Arnold")]);
        assert_eq!(endpoint.routing.action.as_deref(), Some("Arnold"));

        let endpoint = must(&assembler(), &[("apifest.external", "/e")]);
        assert_eq!(endpoint.routing.action, None);

        let endpoint = must(&with_default, &[("apifest.external", "/e"), ("apifest.action", " None ")]);
        assert_eq!(endpoint.routing.action, None);
    }

    #[test]
    fn test_external_path_ignores_surrounding_whitespace() {
        let endpoint = must(&assembler(), &[("apifest.external", "  /twitter/followers  ")]);
        assert_eq!(endpoint.routing.external_path, "/v1/twitter/followers");
    }

    #[test]
    fn test_filter_resolution() {
        let with_default = EndpointAssembler::new(
            AssemblerSettings::new("v1").with_default_filter("com.all.mappings.DefaultFilter"),
        );
        let endpoint = must(&with_default, &[("apifest.external", "/e")]);
        assert_eq!(endpoint.routing.filter.as_deref(), Some("com.all.mappings.DefaultFilter"));

        let endpoint = must(&with_default, &[("apifest.external", "/e"), ("apifest.filter", "Custom")]);
        assert_eq!(endpoint.routing.filter.as_deref(), Some("Custom"));

        assert_eq!(must(&assembler(), &[("apifest.external", "/e")]).routing.filter, None);
    }

    #[test]
    fn test_auth_type_values() {
        let endpoint = must(&assembler(), &[("apifest.external", "/e"), ("apifest.auth.type", "user")]);
        assert_eq!(endpoint.routing.auth_type, Some(AuthType::User));

        let endpoint = must(&assembler(), &[("apifest.external", "/e"), ("apifest.auth.type", "client-app")]);
        assert_eq!(endpoint.routing.auth_type, Some(AuthType::ClientApp));

        let err = assemble(&assembler(), &[("apifest.external", "/e"), ("apifest.auth.type", "admin")])
            .unwrap_err();
        assert_eq!(err.to_string(), "value \"admin\" not supported for apifest.auth.type tag");
    }

    #[test]
    fn test_backend_override() {
        let endpoint = must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.backend.host", "backend.internal"),
                ("apifest.backend.port", "9090"),
            ],
        );
        assert_eq!(endpoint.routing.backend_host.as_deref(), Some("backend.internal"));
        assert_eq!(endpoint.routing.backend_port, Some(9090));
    }

    #[test]
    fn test_backend_falls_back_to_defaults() {
        let host_only = must(&assembler(), &[("apifest.external", "/e"), ("apifest.backend.host", "other")]);
        assert_eq!(host_only.routing.backend_host.as_deref(), Some("localhost"));
        assert_eq!(host_only.routing.backend_port, Some(1212));

        let bad_port = must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.backend.host", "other"),
                ("apifest.backend.port", "eighty"),
            ],
        );
        assert_eq!(bad_port.routing.backend_host.as_deref(), Some("localhost"));
        assert_eq!(bad_port.routing.backend_port, Some(1212));
    }

    #[test]
    fn test_invalid_backend_port_is_logged() {
        let (logs, _guard) = CapturedLogs::install();
        must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.backend.host", "other"),
                ("apifest.backend.port", "eighty"),
            ],
        );
        must(
            &assembler(),
            &[
                ("apifest.external", "/f"),
                ("apifest.backend.host", "other"),
                ("apifest.backend.port", "8080"),
            ],
        );

        let output = logs.contents();
        assert_eq!(output.matches("apifest.backend.port for endpoint is not valid").count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("eighty"));
    }

    #[test]
    fn test_hidden_flags_are_independent() {
        let endpoint = must(&assembler(), &[("apifest.external", "/e"), ("apifest.hidden", "")]);
        assert!(endpoint.routing.hidden);
        assert!(!endpoint.documentation.hidden);

        let endpoint = must(&assembler(), &[("apifest.external", "/e"), ("apifest.docs.hidden", "false")]);
        assert!(!endpoint.routing.hidden);
        assert!(endpoint.documentation.hidden);
    }

    #[test]
    fn test_descriptive_tags() {
        let endpoint = must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.docs.description", "Returns metrics. Supports paging!"),
                ("apifest.docs.group", "Twitter Followers"),
                ("apifest.docs.order", "2"),
                ("apifest.docs.exampleResult", "{}"),
                ("apifest.docs.paramsDescription", "Params"),
                ("apifest.docs.resultsDescription", "Results"),
                ("apifest.scope", "twitter_followers"),
            ],
        );
        let doc = &endpoint.documentation;
        assert_eq!(doc.summary.as_deref(), Some("Returns metrics"));
        assert_eq!(doc.description.as_deref(), Some("Returns metrics. Supports paging!"));
        assert_eq!(doc.group.as_deref(), Some("Twitter Followers"));
        assert_eq!(doc.order, 2);
        assert_eq!(doc.example_request, None);
        assert_eq!(doc.example_result.as_deref(), Some("{}"));
        assert_eq!(doc.params_description.as_deref(), Some("Params"));
        assert_eq!(doc.results_description.as_deref(), Some("Results"));
        assert_eq!(doc.scope.as_deref(), Some("twitter_followers"));
        assert_eq!(endpoint.routing.scope.as_deref(), Some("twitter_followers"));
    }

    #[test]
    fn test_explicit_summary_wins() {
        let endpoint = must(
            &assembler(),
            &[
                ("apifest.external", "/e"),
                ("apifest.docs.description", "Long text. More."),
                ("apifest.docs.summary", "Short"),
            ],
        );
        assert_eq!(endpoint.documentation.summary.as_deref(), Some("Short"));
    }

    #[test]
    fn test_derived_summary_edge_cases() {
        assert_eq!(derive_summary("No terminator"), Some("No terminator".to_string()));
        assert_eq!(derive_summary("Why? Because"), Some("Why".to_string()));
        assert_eq!(derive_summary(".leading"), None);
        assert_eq!(derive_summary(""), None);
    }

    #[test]
    fn test_invalid_order_sorts_last() {
        let endpoint = must(&assembler(), &[("apifest.external", "/e"), ("apifest.docs.order", "soon")]);
        assert_eq!(endpoint.order(), ORDER_LAST);
    }

    #[test]
    fn test_annotations_reach_both_records() {
        let assembler = EndpointAssembler::new(
            AssemblerSettings::new("v1").with_annotations(AnnotationRegistry::parse("a.Custom")),
        );
        let method = MethodDescriptor::new("m")
            .tag("apifest.external", "/e")
            .annotation(AnnotationDescriptor::new("javax.ws.rs.GET"))
            .annotation(
                AnnotationDescriptor::new("a.Custom")
                    .with_attribute("value", AttributeValue::array(["test", "test2"])),
            );
        let endpoint = assembler.assemble(&method).unwrap().unwrap();
        assert_eq!(endpoint.routing.method, Some(HttpMethod::Get));
        assert_eq!(endpoint.documentation.method, Some(HttpMethod::Get));
        assert_eq!(endpoint.routing.custom_properties["a.Custom.value"], "test,test2");
        assert_eq!(endpoint.documentation.custom_properties, endpoint.routing.custom_properties);
    }

    #[test]
    fn test_assemble_all_orders_and_skips() {
        let methods = vec![
            MethodDescriptor::new("metrics")
                .tag("apifest.external", "/metrics")
                .tag("apifest.docs.order", "2"),
            MethodDescriptor::new("helper"),
            MethodDescriptor::new("stream")
                .tag("apifest.external", "/stream")
                .tag("apifest.docs.order", "1"),
        ];
        let endpoints = assembler().assemble_all(&methods).unwrap();
        let paths: Vec<_> = endpoints.iter().map(ParsedEndpoint::external_path).collect();
        assert_eq!(paths, vec!["/v1/stream", "/v1/metrics"]);
    }

    #[test]
    fn test_assemble_all_collects_every_failure() {
        let methods = vec![
            MethodDescriptor::new("a")
                .tag("apifest.external", "/a")
                .tag("apifest.auth.type", "admin"),
            MethodDescriptor::new("ok").tag("apifest.external", "/ok"),
            MethodDescriptor::new("b")
                .owner("x.Resource")
                .tag("apifest.external", "/b")
                .tag("apifest.auth.type", "root"),
        ];
        let err = assembler().assemble_all(&methods).unwrap_err();
        let failures = err.endpoint_errors();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].to_string().starts_with("endpoint /a:"));
        assert!(failures[1].to_string().contains("\"root\""));
    }
}
