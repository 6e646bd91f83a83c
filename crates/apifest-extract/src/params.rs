//! Request parameter, result parameter and exception groups.
//!
//! A group is introduced by a tag `<prefix><name>` where `<name>` is a bare
//! word; sibling tags `<prefix><name>.<suffix>` refine it.

use apifest_core::keys::{
    EXCEPTIONS_PREFIX, PARAMS_PREFIX, RESULTS_PREFIX, SUFFIX_CODE, SUFFIX_DESCRIPTION,
    SUFFIX_EXAMPLE_VALUE, SUFFIX_NAME, SUFFIX_OPTIONAL, SUFFIX_TYPE,
};
use apifest_core::{ExceptionDoc, RequestParamDoc, ResultParamDoc, TagIndex};
use tracing::warn;

/// Builds the documented request parameters.
#[must_use]
pub fn request_params(tags: &TagIndex) -> Vec<RequestParamDoc> {
    groups(tags, PARAMS_PREFIX)
        .map(|(name, description)| {
            let group = Group::new(tags, PARAMS_PREFIX, name);
            RequestParamDoc {
                name: group.public_name(),
                param_type: group.sibling(SUFFIX_TYPE),
                description: description.to_string(),
                required: !group.has(SUFFIX_OPTIONAL),
                example_value: group.sibling(SUFFIX_EXAMPLE_VALUE),
            }
        })
        .collect()
}

/// Builds the documented result fields.
#[must_use]
pub fn result_params(tags: &TagIndex) -> Vec<ResultParamDoc> {
    groups(tags, RESULTS_PREFIX)
        .map(|(name, description)| {
            let group = Group::new(tags, RESULTS_PREFIX, name);
            ResultParamDoc {
                name: group.public_name(),
                param_type: group.sibling(SUFFIX_TYPE),
                description: description.to_string(),
                required: !group.has(SUFFIX_OPTIONAL),
            }
        })
        .collect()
}

/// Builds the documented exceptions.
///
/// A malformed `.code` is logged against `external_path` and left unset.
#[must_use]
pub fn exceptions(tags: &TagIndex, external_path: &str) -> Vec<ExceptionDoc> {
    groups(tags, EXCEPTIONS_PREFIX)
        .map(|(name, condition)| {
            let group = Group::new(tags, EXCEPTIONS_PREFIX, name);
            let code = group.raw(SUFFIX_CODE).and_then(|value| {
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| {
                        warn!(
                            external_path,
                            exception = name,
                            value,
                            "invalid code given for exception, leaving it unset"
                        );
                    })
                    .ok()
            });
            ExceptionDoc {
                name: name.to_string(),
                condition: condition.to_string(),
                description: group.sibling(SUFFIX_DESCRIPTION),
                code,
            }
        })
        .collect()
}

fn groups<'a>(tags: &'a TagIndex, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    tags.with_prefix(prefix).filter(|(name, _)| is_bare_name(name))
}

fn is_bare_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

struct Group<'a> {
    tags: &'a TagIndex,
    prefix: &'a str,
    name: &'a str,
}

impl<'a> Group<'a> {
    fn new(tags: &'a TagIndex, prefix: &'a str, name: &'a str) -> Self {
        Self { tags, prefix, name }
    }

    fn raw(&self, suffix: &str) -> Option<&'a str> {
        self.tags
            .get(&format!("{}{}.{suffix}", self.prefix, self.name))
    }

    fn sibling(&self, suffix: &str) -> Option<String> {
        self.raw(suffix).map(str::to_string)
    }

    fn has(&self, suffix: &str) -> bool {
        self.raw(suffix).is_some()
    }

    fn public_name(&self) -> String {
        self.raw(SUFFIX_NAME)
            .map_or_else(|| self.name.to_string(), |name| name.trim().to_string())
    }
}
