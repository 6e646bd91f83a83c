//! Block tags and the first-wins tag index.
//!
//! A method declaration carries an ordered list of [`RawTag`]s. The
//! [`TagIndex`] folds that list into an immutable name to text association in
//! which the first occurrence of a name wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Marker character that introduces a block tag in comment text.
pub const TAG_MARKER: char = '@';

/// Tag names recognized by the endpoint assembler.
pub mod keys {
    /// External path of the endpoint; its presence makes a method an endpoint.
    pub const EXTERNAL: &str = "apifest.external";
    /// Internal (backend) path template.
    pub const INTERNAL: &str = "apifest.internal";
    /// Prefix of per path variable regular expression tags.
    pub const RE_PREFIX: &str = "apifest.re.";
    /// Authorization scope.
    pub const SCOPE: &str = "apifest.scope";
    /// Authentication type, `user` or `client-app`.
    pub const AUTH_TYPE: &str = "apifest.auth.type";
    /// Action class name.
    pub const ACTION: &str = "apifest.action";
    /// Filter class name.
    pub const FILTER: &str = "apifest.filter";
    /// Backend host override.
    pub const BACKEND_HOST: &str = "apifest.backend.host";
    /// Backend port override.
    pub const BACKEND_PORT: &str = "apifest.backend.port";
    /// Hides the endpoint from the routing document.
    pub const HIDDEN: &str = "apifest.hidden";

    /// Hides the endpoint from the documentation document.
    pub const DOCS_HIDDEN: &str = "apifest.docs.hidden";
    /// Documentation group.
    pub const DOCS_GROUP: &str = "apifest.docs.group";
    /// One line summary.
    pub const DOCS_SUMMARY: &str = "apifest.docs.summary";
    /// Long description.
    pub const DOCS_DESCRIPTION: &str = "apifest.docs.description";
    /// Example request.
    pub const DOCS_EXAMPLE_REQUEST: &str = "apifest.docs.exampleRequest";
    /// Example result.
    pub const DOCS_EXAMPLE_RESULT: &str = "apifest.docs.exampleResult";
    /// Free text introducing the request parameters.
    pub const DOCS_PARAMS_DESCRIPTION: &str = "apifest.docs.paramsDescription";
    /// Free text introducing the result parameters.
    pub const DOCS_RESULTS_DESCRIPTION: &str = "apifest.docs.resultsDescription";
    /// Position of the endpoint in the documentation.
    pub const DOCS_ORDER: &str = "apifest.docs.order";

    /// Prefix of request parameter groups.
    pub const PARAMS_PREFIX: &str = "apifest.docs.params.";
    /// Prefix of result parameter groups.
    pub const RESULTS_PREFIX: &str = "apifest.docs.results.";
    /// Prefix of exception groups.
    pub const EXCEPTIONS_PREFIX: &str = "apifest.docs.exceptions.";

    /// Overrides the public name of a parameter.
    pub const SUFFIX_NAME: &str = "name";
    /// Parameter type.
    pub const SUFFIX_TYPE: &str = "type";
    /// Marks a parameter as not required.
    pub const SUFFIX_OPTIONAL: &str = "optional";
    /// Example value of a request parameter.
    pub const SUFFIX_EXAMPLE_VALUE: &str = "exampleValue";
    /// Exception description.
    pub const SUFFIX_DESCRIPTION: &str = "description";
    /// Exception status code.
    pub const SUFFIX_CODE: &str = "code";
}

/// One block tag occurrence as attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTag {
    /// Tag name, with or without the leading marker.
    pub name: String,
    /// Tag text.
    #[serde(default)]
    pub text: String,
}

impl RawTag {
    /// Creates a new raw tag.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// First-wins mapping from tag name to tag text.
///
/// Entries keep the order in which their names were first seen.
///
/// # Example
///
/// ```
/// use apifest_core::{RawTag, TagIndex};
///
/// let tags = vec![
///     RawTag::new("@apifest.scope", "first"),
///     RawTag::new("apifest.scope", "second"),
/// ];
/// let index = TagIndex::from_tags(&tags);
/// assert_eq!(index.get("apifest.scope"), Some("first"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    entries: IndexMap<String, String>,
}

impl TagIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds raw tag occurrences into an index, keeping the first text per name.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a RawTag>,
    {
        tags.into_iter()
            .map(|tag| (tag.name.as_str(), tag.text.as_str()))
            .collect()
    }

    /// Returns the text of the named tag.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(normalize_name(name)).map(String::as_str)
    }

    /// Returns `true` if the named tag is present, whatever its text.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(normalize_name(name))
    }

    /// Iterates over `(name, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Iterates over tags whose name starts with `prefix`, yielding the
    /// remainder of the name after the prefix together with the text.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter()
            .filter_map(move |(name, text)| name.strip_prefix(prefix).map(|rest| (rest, text)))
    }

    /// Returns the number of distinct tag names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TagIndex
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .fold(IndexMap::new(), |mut entries, (name, text)| {
                entries
                    .entry(normalize_name(name.as_ref()).to_string())
                    .or_insert_with(|| text.into());
                entries
            });
        Self { entries }
    }
}

fn normalize_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix(TAG_MARKER).unwrap_or(name)
}
