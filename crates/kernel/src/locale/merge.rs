//! Placeholder normalization and deep merge.

use std::sync::LazyLock;

use regex::Regex;
use tally_sdk::messages::{MessageDict, MessageValue};

/// Matches `{{name}}`, `{{ name }}` and the trim-marker form `{{- name}}`.
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static DOUBLE_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*-?\s*([^{}]+?)\s*\}\}").expect("valid regex literal"));

/// Rewrite double-brace placeholders in one string to `{name}`.
pub fn normalize_text(text: &str) -> String {
    DOUBLE_BRACE.replace_all(text, "{${1}}").into_owned()
}

/// Rewrite placeholders in every text leaf of `dict`, at any depth.
pub fn normalize_placeholders(dict: &mut MessageDict) {
    for value in dict.values_mut() {
        normalize_value(value);
    }
}

fn normalize_value(value: &mut MessageValue) {
    match value {
        MessageValue::Text(text) => {
            if text.contains("{{") {
                *text = normalize_text(text);
            }
        }
        MessageValue::List(items) => items.iter_mut().for_each(normalize_value),
        MessageValue::Dict(dict) => normalize_placeholders(dict),
    }
}

/// Merge `source` into `target`.
///
/// Where both sides hold a dictionary the merge recurses. Anything else is
/// replaced wholesale by the source value; lists are never merged element-wise.
pub fn deep_merge(target: &mut MessageDict, source: MessageDict) {
    for (key, value) in source {
        match value {
            MessageValue::Dict(incoming) => match target.get_mut(&key) {
                Some(MessageValue::Dict(existing)) => deep_merge(existing, incoming),
                _ => target.insert(key, MessageValue::Dict(incoming)),
            },
            other => target.insert(key, other),
        }
    }
}

/// Build the dictionary for one locale.
///
/// Layers, each normalized before it is applied: `base`, then every module
/// contribution in the order given, then the third-party validation
/// dictionary. Later layers win.
pub fn merge_locale<'a>(
    base: &MessageDict,
    contributions: impl IntoIterator<Item = &'a MessageDict>,
    third_party: Option<&'a MessageDict>,
) -> MessageDict {
    let mut merged = base.clone();
    normalize_placeholders(&mut merged);

    for layer in contributions.into_iter().chain(third_party) {
        let mut layer = layer.clone();
        normalize_placeholders(&mut layer);
        deep_merge(&mut merged, layer);
    }
    merged
}
