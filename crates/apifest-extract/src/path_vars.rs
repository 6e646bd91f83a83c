//! Path variable resolution.
//!
//! Placeholders in an internal path template (`{platform}/{clientId}/x`) are
//! paired with the regular expression declared by an `apifest.re.<name>` tag.

use apifest_core::{keys, PathVariable, PathVariables, TagIndex};
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(\w*-?_?\w*)\}").expect("valid regex"))
}

/// Resolves the constrained path variables of an internal path template.
///
/// Placeholders are visited left to right, once per occurrence. Placeholders
/// without a declared expression are skipped.
///
/// # Example
///
/// ```
/// use apifest_core::TagIndex;
/// use apifest_extract::resolve_path_variables;
///
/// let tags: TagIndex = [("apifest.re.clientId", "\\d+")].into_iter().collect();
/// let vars = resolve_path_variables("/{platform}/{clientId}/followers", &tags);
/// assert_eq!(vars.names().as_deref(), Some("clientId"));
/// assert_eq!(vars.expressions().as_deref(), Some("\\d+"));
/// ```
#[must_use]
pub fn resolve_path_variables(template: &str, tags: &TagIndex) -> PathVariables {
    placeholder_pattern()
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .filter_map(|name| {
            let name = name.as_str();
            tags.get(&format!("{}{name}", keys::RE_PREFIX))
                .map(|expression| PathVariable {
                    name: name.to_string(),
                    expression: expression.to_string(),
                })
        })
        .collect()
}
