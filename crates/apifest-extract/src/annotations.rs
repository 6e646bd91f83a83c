//! Annotation classification.
//!
//! HTTP verb markers set the endpoint method. Annotations listed in the
//! [`AnnotationRegistry`] contribute their selected attributes as custom
//! properties keyed `<qualifiedTypeName>.<attributeName>`.

use apifest_core::{AnnotationDescriptor, AnnotationRegistry, HttpMethod};
use indexmap::IndexMap;

/// What the annotations of one method contribute to its endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedAnnotations {
    /// Method of the last verb marker found.
    pub method: Option<HttpMethod>,
    /// Flattened custom annotation attributes.
    pub custom_properties: IndexMap<String, String>,
}

/// Classifies a method's annotations against the registry.
#[must_use]
pub fn classify(
    annotations: &[AnnotationDescriptor],
    registry: &AnnotationRegistry,
) -> ClassifiedAnnotations {
    annotations
        .iter()
        .fold(ClassifiedAnnotations::default(), |mut classified, annotation| {
            if let Some(method) = HttpMethod::from_marker(annotation.simple_name()) {
                classified.method = Some(method);
                return classified;
            }
            if registry.contains(&annotation.type_name) {
                let selected = annotation
                    .attributes
                    .iter()
                    .filter(|(name, _)| registry.selects(&annotation.type_name, name));
                for (name, value) in selected {
                    classified
                        .custom_properties
                        .insert(format!("{}.{name}", annotation.type_name), value.flatten());
                }
            }
            classified
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use apifest_core::AttributeValue;

    #[test]
    fn test_verb_marker() {
        let annotations = vec![
            AnnotationDescriptor::new("javax.ws.rs.Path").with_attribute("value", "/x"),
            AnnotationDescriptor::new("javax.ws.rs.POST"),
        ];
        let classified = classify(&annotations, &AnnotationRegistry::new());
        assert_eq!(classified.method, Some(HttpMethod::Post));
        assert!(classified.custom_properties.is_empty());
    }

    #[test]
    fn test_last_verb_wins() {
        let annotations = vec![
            AnnotationDescriptor::new("javax.ws.rs.GET"),
            AnnotationDescriptor::new("javax.ws.rs.DELETE"),
        ];
        let classified = classify(&annotations, &AnnotationRegistry::new());
        assert_eq!(classified.method, Some(HttpMethod::Delete));
    }

    #[test]
    fn test_no_verb() {
        let classified = classify(&[], &AnnotationRegistry::new());
        assert_eq!(classified, ClassifiedAnnotations::default());
    }

    #[test]
    fn test_custom_properties_all_attributes() {
        let annotations = vec![AnnotationDescriptor::new("com.example.CustomAnnotation")
            .with_attribute("value", AttributeValue::array(["test", "test2"]))];
        let registry = AnnotationRegistry::parse("com.example.CustomAnnotation");
        let classified = classify(&annotations, &registry);
        assert_eq!(
            classified.custom_properties.get("com.example.CustomAnnotation.value"),
            Some(&"test,test2".to_string())
        );
    }

    #[test]
    fn test_custom_properties_selected_attributes() {
        let annotations = vec![AnnotationDescriptor::new("com.example.Multiple")
            .with_attribute("names", AttributeValue::array(["a", "b"]))
            .with_attribute("value", AttributeValue::array([2_i64, 1]))];
        let registry = AnnotationRegistry::parse("com.example.Multiple:value");
        let classified = classify(&annotations, &registry);
        assert_eq!(classified.custom_properties.len(), 1);
        assert_eq!(
            classified.custom_properties["com.example.Multiple.value"],
            "2,1"
        );
    }

    #[test]
    fn test_unregistered_annotation_ignored() {
        let annotations = vec![AnnotationDescriptor::new("com.example.Other").with_attribute("x", 1_i64)];
        let registry = AnnotationRegistry::parse("com.example.Multiple");
        assert!(classify(&annotations, &registry).custom_properties.is_empty());
    }

    #[test]
    fn test_scalar_value_uses_plain_form() {
        let annotations = vec![AnnotationDescriptor::new("a.Limit")
            .with_attribute("max", 10_i64)
            .with_attribute("name", "quota")];
        let classified = classify(&annotations, &AnnotationRegistry::parse("a.Limit"));
        assert_eq!(classified.custom_properties["a.Limit.max"], "10");
        assert_eq!(classified.custom_properties["a.Limit.name"], "quota");
    }
}
