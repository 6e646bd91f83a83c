//! Registry of custom annotations whose attributes become custom properties.
//!
//! The registry maps a qualified annotation type name to the attributes that
//! should be extracted from it. An empty list means "all attributes".
//!
//! It can be read from a table (`{"a.b.Custom": [], "a.b.Other": ["names"]}`)
//! or from the compact string form `"a.b.Custom,a.b.Other:names"`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Attributes selected for one annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    All,
    Named(Vec<String>),
}

/// Custom annotation extraction registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Vec<String>>",
    into = "IndexMap<String, Vec<String>>"
)]
pub struct AnnotationRegistry {
    entries: IndexMap<String, Selection>,
}

impl AnnotationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the compact `Type[:attr],Type[:attr]...` form.
    ///
    /// Blank entries are skipped. A bare `Type` selects every attribute and
    /// takes precedence over explicit attribute entries for that type.
    ///
    /// # Example
    ///
    /// ```
    /// use apifest_core::AnnotationRegistry;
    ///
    /// let registry = AnnotationRegistry::parse("a.Custom:value, a.Other");
    /// assert!(registry.selects("a.Custom", "value"));
    /// assert!(!registry.selects("a.Custom", "names"));
    /// assert!(registry.selects("a.Other", "anything"));
    /// ```
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        spec.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .fold(Self::new(), |registry, entry| match entry.split_once(':') {
                Some((type_name, attribute)) => {
                    registry.with_attribute(type_name.trim(), attribute.trim())
                }
                None => registry.with_all(entry),
            })
    }

    /// Registers a type with every attribute selected.
    #[must_use]
    pub fn with_all(mut self, type_name: impl Into<String>) -> Self {
        self.entries.insert(type_name.into(), Selection::All);
        self
    }

    /// Registers one attribute of a type.
    ///
    /// Has no effect if the type already selects every attribute.
    #[must_use]
    pub fn with_attribute(mut self, type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        let selection = self
            .entries
            .entry(type_name.into())
            .or_insert_with(|| Selection::Named(Vec::new()));
        if let Selection::Named(attributes) = selection {
            if !attributes.contains(&attribute) {
                attributes.push(attribute);
            }
        }
        self
    }

    /// Returns `true` if the type is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Returns `true` if the attribute of the type should be extracted.
    #[must_use]
    pub fn selects(&self, type_name: &str, attribute: &str) -> bool {
        match self.entries.get(type_name) {
            Some(Selection::All) => true,
            Some(Selection::Named(attributes)) => attributes.iter().any(|name| name == attribute),
            None => false,
        }
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges another registry into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |registry, (type_name, selection)| match selection {
                Selection::All => registry.with_all(type_name),
                Selection::Named(attributes) => attributes
                    .into_iter()
                    .fold(registry, |registry, attribute| {
                        registry.with_attribute(type_name.clone(), attribute)
                    }),
            })
    }
}

impl From<IndexMap<String, Vec<String>>> for AnnotationRegistry {
    fn from(table: IndexMap<String, Vec<String>>) -> Self {
        table
            .into_iter()
            .fold(Self::new(), |registry, (type_name, attributes)| {
                if attributes.is_empty() {
                    registry.with_all(type_name)
                } else {
                    attributes.into_iter().fold(registry, |registry, attribute| {
                        registry.with_attribute(type_name.clone(), attribute)
                    })
                }
            })
    }
}

impl From<AnnotationRegistry> for IndexMap<String, Vec<String>> {
    fn from(registry: AnnotationRegistry) -> Self {
        registry
            .entries
            .into_iter()
            .map(|(type_name, selection)| match selection {
                Selection::All => (type_name, Vec::new()),
                Selection::Named(attributes) => (type_name, attributes),
            })
            .collect()
    }
}

impl FromStr for AnnotationRegistry {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
