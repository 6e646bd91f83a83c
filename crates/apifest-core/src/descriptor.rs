//! Method descriptors handed over by the source-analysis collaborator.
//!
//! A [`MethodSet`] is the complete, materialized input of one generator run.
//! Each [`MethodDescriptor`] carries the raw documentation comment and/or
//! pre-split block tags of one interface method, plus its annotations as
//! explicit [`AnnotationDescriptor`] values.

use crate::error::{ApifestError, ApifestResult};
use crate::tags::RawTag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The value of one annotation attribute.
///
/// Arrays may nest; [`AttributeValue::flatten`] joins every leaf with `,`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean literal.
    Boolean(bool),
    /// An integral literal.
    Integer(i64),
    /// A floating point literal.
    Float(f64),
    /// A string, class or enum constant literal.
    Text(String),
    /// An array of values.
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Creates an array value from anything convertible to attribute values.
    #[must_use]
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the flattened string form of the value.
    ///
    /// Scalars use their plain string form; arrays are comma-joined. Floats
    /// always carry a fractional part, so `1.0` stays `1.0`.
    #[must_use]
    pub fn flatten(&self) -> String {
        match self {
            Self::Array(items) => items
                .iter()
                .map(Self::flatten)
                .collect::<Vec<_>>()
                .join(","),
            Self::Boolean(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => format!("{value:?}"),
            Self::Text(value) => value.clone(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// One annotation on a method: its qualified type name and attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationDescriptor {
    /// Fully qualified annotation type name, e.g. `javax.ws.rs.GET`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Attribute values in declaration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, AttributeValue>,
}

impl AnnotationDescriptor {
    /// Creates an annotation without attributes.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the simple name: the text after the last `.` of the type name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.type_name
            .rsplit_once('.')
            .map_or(self.type_name.as_str(), |(_, simple)| simple)
    }
}

/// One declared interface method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDescriptor {
    /// Qualified name of the declaring interface or class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Method name.
    pub name: String,
    /// Raw documentation comment, scanned for block tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Pre-split block tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<RawTag>,
    /// Method-level annotations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDescriptor>,
}

impl MethodDescriptor {
    /// Creates a method descriptor with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the declaring type.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the raw documentation comment.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds a pre-split block tag.
    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.tags.push(RawTag::new(name, text));
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns `owner#name`, or just the name when the owner is unknown.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}#{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// All methods of one generator run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSet {
    /// Declared methods in discovery order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl MethodSet {
    /// Creates a method set.
    #[must_use]
    pub fn new(methods: Vec<MethodDescriptor>) -> Self {
        Self { methods }
    }

    /// Parses a method set from a JSON document.
    pub fn from_json(content: &str) -> ApifestResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads and parses a method set from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ApifestResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ApifestError::ReadDescriptors {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Returns the number of methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if there are no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
