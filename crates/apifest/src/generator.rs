//! The generator run pipeline.
//!
//! A run assembles every method first. Documents are written only once all
//! endpoints assembled, so a failing endpoint never leaves a partial output.

use std::path::{Path, PathBuf};

use apifest_config::{ApifestConfig, OutputMode};
use apifest_core::{MethodSet, ParsedEndpoint};
use apifest_docs::{DocumentationGenerator, MappingGenerator};
use apifest_extract::{AssemblerSettings, EndpointAssembler};
use tracing::info;

use crate::error::GeneratorResult;

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of endpoints assembled.
    pub endpoints: usize,
    /// Documents written, in the order they were written.
    pub written: Vec<PathBuf>,
}

/// Turns a method set into the requested output documents.
///
/// # Example
///
/// ```no_run
/// use apifest::{ApifestConfig, Generator, MethodSet};
///
/// # fn main() -> Result<(), apifest::GeneratorError> {
/// let config = ApifestConfig::builder()
///     .version("v1")
///     .backend("localhost", 1212)
///     .filename("all-mappings.json")
///     .build();
///
/// let methods = MethodSet::from_file("methods.json")?;
/// let summary = Generator::from_config(config)?.run(&methods)?;
/// println!("{} endpoints", summary.endpoints);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    config: ApifestConfig,
    assembler: EndpointAssembler,
    output_dir: PathBuf,
}

impl Generator {
    /// Creates a generator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Config` if the configuration is invalid.
    pub fn from_config(config: ApifestConfig) -> GeneratorResult<Self> {
        config.validate()?;
        let assembler = EndpointAssembler::new(assembler_settings(&config));
        Ok(Self {
            config,
            assembler,
            output_dir: PathBuf::from("."),
        })
    }

    /// Sets the directory the output file names are resolved against.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ApifestConfig {
        &self.config
    }

    /// Assembles every method, in documentation order.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Extract` carrying every endpoint failure.
    pub fn assemble(&self, methods: &MethodSet) -> GeneratorResult<Vec<ParsedEndpoint>> {
        let endpoints = self.assembler.assemble_all(&methods.methods)?;
        info!(
            methods = methods.len(),
            endpoints = endpoints.len(),
            "assembled endpoints"
        );
        Ok(endpoints)
    }

    /// Assembles every method and writes the requested documents.
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint fails to assemble (nothing is written)
    /// or a document cannot be written.
    pub fn run(&self, methods: &MethodSet) -> GeneratorResult<RunSummary> {
        let endpoints = self.assemble(methods)?;
        let mut written = Vec::new();

        if self.config.wants(OutputMode::Mapping) {
            if let Some(path) = self.output_path(self.config.mapping_filename().as_deref()) {
                self.mapping_generator().write(&endpoints, &path)?;
                written.push(path);
            }
        }

        if self.config.wants(OutputMode::Doc) {
            if let Some(path) = self.output_path(self.config.docs_filename()) {
                self.documentation_generator().write(&endpoints, &path)?;
                written.push(path);
            }
        }

        info!(
            endpoints = endpoints.len(),
            documents = written.len(),
            "generation complete"
        );

        Ok(RunSummary {
            endpoints: endpoints.len(),
            written,
        })
    }

    fn mapping_generator(&self) -> MappingGenerator {
        let generator = MappingGenerator::new().version(self.version());
        match (self.config.backend_host(), self.config.backend.port) {
            (Some(host), Some(port)) => generator.backend(host, port),
            _ => generator,
        }
    }

    fn documentation_generator(&self) -> DocumentationGenerator {
        DocumentationGenerator::new().version(self.version())
    }

    fn version(&self) -> &str {
        self.config.version().unwrap_or_default()
    }

    fn output_path(&self, filename: Option<&str>) -> Option<PathBuf> {
        filename.map(|name| resolve(&self.output_dir, name))
    }
}

fn resolve(dir: &Path, name: &str) -> PathBuf {
    let name = Path::new(name);
    if name.is_absolute() {
        name.to_path_buf()
    } else {
        dir.join(name)
    }
}

/// Builds the assembler defaults from a validated configuration.
fn assembler_settings(config: &ApifestConfig) -> AssemblerSettings {
    let mut settings = AssemblerSettings::new(config.version().unwrap_or_default())
        .with_annotations(config.annotations.clone());

    if let (Some(host), Some(port)) = (config.backend_host(), config.backend.port) {
        settings = settings.with_backend(host, port);
    }
    if let Some(action) = config.default_action() {
        settings = settings.with_default_action(action);
    }
    if let Some(filter) = config.default_filter() {
        settings = settings.with_default_filter(filter);
    }
    if let Some(path) = &config.defaults.application_path {
        settings = settings.with_application_path(path.as_str());
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use apifest_config::DefaultsSection;
    use apifest_core::{AnnotationRegistry, MethodDescriptor};

    fn config() -> ApifestConfig {
        ApifestConfig::builder()
            .version("v1")
            .backend("localhost", 1212)
            .filename("all-mappings.json")
            .defaults(DefaultsSection {
                action_class: Some("com.all.mappings.DefaultMapping".to_string()),
                filter_class: Some("null".to_string()),
                application_path: Some("/api".to_string()),
            })
            .annotations(AnnotationRegistry::parse("com.example.Custom"))
            .build()
    }

    #[test]
    fn test_assembler_settings_from_config() {
        let settings = assembler_settings(&config());
        assert_eq!(settings.version, "v1");
        assert_eq!(settings.backend_host.as_deref(), Some("localhost"));
        assert_eq!(settings.backend_port, Some(1212));
        assert_eq!(
            settings.default_action.as_deref(),
            Some("com.all.mappings.DefaultMapping")
        );
        assert_eq!(settings.default_filter, None);
        assert_eq!(settings.application_prefix(), "/api");
        assert!(settings.annotations.contains("com.example.Custom"));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = ApifestConfig::builder().version("v1").build();
        assert!(Generator::from_config(config).is_err());
    }

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve(Path::new("/out"), "mapping.json"),
            PathBuf::from("/out/mapping.json")
        );
        assert_eq!(
            resolve(Path::new("/out"), "/abs/mapping.json"),
            PathBuf::from("/abs/mapping.json")
        );
    }

    #[test]
    fn test_assemble_skips_untagged_methods() {
        let generator = Generator::from_config(config()).unwrap();
        let methods = MethodSet::new(vec![
            MethodDescriptor::new("untagged"),
            MethodDescriptor::new("tagged")
                .tag("apifest.external", "/ping")
                .tag("apifest.internal", "/ping"),
        ]);
        let endpoints = generator.assemble(&methods).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].external_path(), "/v1/ping");
        assert_eq!(endpoints[0].routing.internal_path.as_deref(), Some("/api/ping"));
    }

    #[test]
    fn test_run_writes_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::from_config(config())
            .unwrap()
            .with_output_dir(dir.path());
        let methods = MethodSet::new(vec![MethodDescriptor::new("bad")
            .tag("apifest.external", "/bad")
            .tag("apifest.auth.type", "admin")]);

        assert!(generator.run(&methods).is_err());
        assert!(!dir.path().join("all-mappings.json").exists());
    }

    #[test]
    fn test_run_null_mapping_filename_uses_versioned_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.mapping.filename = Some("null".to_string());
        let generator = Generator::from_config(config)
            .unwrap()
            .with_output_dir(dir.path());
        let methods = MethodSet::new(vec![MethodDescriptor::new("ping")
            .tag("apifest.external", "/ping")
            .tag("apifest.internal", "/ping")]);

        let summary = generator.run(&methods).unwrap();
        assert_eq!(summary.written, vec![dir.path().join("output_mapping_v1.json")]);
    }
}
