//! Block tag scanner for raw documentation comments.
//!
//! Comment decoration (`/**`, `*/`, leading `*`, `///`, `//!`) is stripped.
//! A line starting with `@` followed by a letter opens a new tag whose name
//! runs to the first whitespace. Every other line continues the current tag.
//! Text before the first tag is the main description and is ignored.

use apifest_core::{MethodDescriptor, RawTag, TAG_MARKER};

/// Splits a raw documentation comment into block tags, in order.
///
/// # Example
///
/// ```
/// use apifest_extract::scan_doc;
///
/// let tags = scan_doc("/**\n * Lists followers.\n * @apifest.external /followers\n * @apifest.scope twitter\n */");
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags[0].name, "apifest.external");
/// assert_eq!(tags[0].text, "/followers");
/// ```
#[must_use]
pub fn scan_doc(doc: &str) -> Vec<RawTag> {
    let mut tags = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in doc.lines().map(strip_decoration) {
        if let Some((name, text)) = split_tag(line) {
            if let Some(open) = current.take() {
                tags.push(finish(open));
            }
            current = Some((name.to_string(), vec![text]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some(open) = current {
        tags.push(finish(open));
    }
    tags
}

/// Returns every tag of a method: scanned comment tags first, then the
/// explicit tags.
#[must_use]
pub fn collect_tags(method: &MethodDescriptor) -> Vec<RawTag> {
    let mut tags = method.doc.as_deref().map(scan_doc).unwrap_or_default();
    tags.extend(method.tags.iter().cloned());
    tags
}

fn strip_decoration(line: &str) -> &str {
    let mut line = line.trim();
    if let Some(rest) = line.strip_prefix("/**") {
        line = rest;
    } else if let Some(rest) = line.strip_prefix("///").or_else(|| line.strip_prefix("//!")) {
        line = rest;
    }
    if let Some(rest) = line.strip_suffix("*/") {
        line = rest;
    }
    let line = line.trim_start();
    line.strip_prefix('*').unwrap_or(line).trim()
}

fn split_tag(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(TAG_MARKER)?;
    if !rest.starts_with(|c: char| c.is_alphabetic()) {
        return None;
    }
    match rest.split_once(char::is_whitespace) {
        Some((name, text)) => Some((name, text.trim())),
        None => Some((rest, "")),
    }
}

fn finish((name, lines): (String, Vec<&str>)) -> RawTag {
    RawTag::new(name, lines.join("\n").trim())
}
