//! Per-locale merged dictionaries with translation lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::{Captures, Regex};
use tally_sdk::messages::MessageDict;
use tracing::{debug, warn};

use super::error::LocaleError;
use super::merge::merge_locale;
use crate::registry::Registry;

/// Locales the shell ships base and validation dictionaries for.
pub const SHIPPED_LOCALES: [&str; 2] = ["en-US", "zh-CN"];

/// (locale, base dictionary, validation dictionary)
const SHIPPED: [(&str, &str, &str); 2] = [
    (
        "en-US",
        include_str!("../../locales/en-US.json"),
        include_str!("../../locales/validation/en-US.json"),
    ),
    (
        "zh-CN",
        include_str!("../../locales/zh-CN.json"),
        include_str!("../../locales/validation/zh-CN.json"),
    ),
];

/// Matches `{name}` placeholders in normalized text.
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*([A-Za-z0-9_.-]+)\s*\}").expect("valid regex literal"));

/// Merged dictionaries per locale.
///
/// Merging happens on first use of a locale and the result is cached until
/// [`clear_cache`](Self::clear_cache). Callers get an `Arc` so a cache clear
/// never invalidates a dictionary someone is still reading.
pub struct LocaleCatalog {
    bases: BTreeMap<String, MessageDict>,
    validation: BTreeMap<String, MessageDict>,
    contributions: BTreeMap<String, Vec<MessageDict>>,
    fallback: String,
    cache: DashMap<String, Arc<MessageDict>>,
}

impl LocaleCatalog {
    /// A catalog holding only the registry's module contributions.
    pub fn new(registry: &Registry, fallback: impl Into<String>) -> Self {
        let contributions = registry
            .messages_by_locale()
            .iter()
            .map(|(locale, list)| {
                (
                    locale.clone(),
                    list.iter().map(|c| c.messages.clone()).collect(),
                )
            })
            .collect();

        Self {
            bases: BTreeMap::new(),
            validation: BTreeMap::new(),
            contributions,
            fallback: fallback.into(),
            cache: DashMap::new(),
        }
    }

    /// A catalog with the shell's shipped base and validation dictionaries.
    ///
    /// # Errors
    /// Returns an error if a shipped dictionary is malformed.
    pub fn shipped(registry: &Registry, fallback: impl Into<String>) -> Result<Self, LocaleError> {
        let mut catalog = Self::new(registry, fallback);
        for (locale, base, validation) in SHIPPED {
            catalog.bases.insert(locale.to_string(), parse(locale, "base", base)?);
            catalog
                .validation
                .insert(locale.to_string(), parse(locale, "validation", validation)?);
        }
        debug!(locales = SHIPPED.len(), "loaded shipped dictionaries");
        Ok(catalog)
    }

    /// Replace the base dictionary for `locale`.
    pub fn with_base(mut self, locale: impl Into<String>, dict: MessageDict) -> Self {
        self.bases.insert(locale.into(), dict);
        self.cache.clear();
        self
    }

    /// Replace the third-party validation dictionary for `locale`.
    pub fn with_validation(mut self, locale: impl Into<String>, dict: MessageDict) -> Self {
        self.validation.insert(locale.into(), dict);
        self.cache.clear();
        self
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Every locale with at least one dictionary, sorted.
    pub fn locales(&self) -> Vec<&str> {
        self.bases
            .keys()
            .chain(self.validation.keys())
            .chain(self.contributions.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn supports(&self, locale: &str) -> bool {
        self.bases.contains_key(locale)
            || self.validation.contains_key(locale)
            || self.contributions.contains_key(locale)
    }

    /// The merged dictionary for `locale`.
    ///
    /// Unsupported locales get the fallback locale's dictionary.
    pub fn messages(&self, locale: &str) -> Arc<MessageDict> {
        let locale = if self.supports(locale) {
            locale
        } else {
            warn!(locale, fallback = %self.fallback, "unsupported locale, using fallback");
            self.fallback.as_str()
        };

        let entry = self
            .cache
            .entry(locale.to_string())
            .or_insert_with(|| Arc::new(self.build(locale)));
        Arc::clone(entry.value())
    }

    /// Whether `locale` currently has a merged dictionary cached.
    pub fn is_cached(&self, locale: &str) -> bool {
        self.cache.contains_key(locale)
    }

    /// Drop every merged dictionary. Call after a locale or module-set change.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Translate a dotted key, interpolating `{name}` placeholders.
    ///
    /// Looks in `locale`, then the fallback locale. A key found in neither
    /// comes back unchanged so missing text stays visible instead of blank.
    pub fn translate(&self, locale: &str, key: &str, params: &[(&str, &str)]) -> String {
        let found = self.lookup(locale, key).or_else(|| {
            if locale == self.fallback {
                None
            } else {
                self.lookup(&self.fallback, key)
            }
        });

        match found {
            Some(text) => interpolate(&text, params),
            None => {
                debug!(locale, key, "missing translation");
                key.to_string()
            }
        }
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        self.messages(locale)
            .get_path(key)
            .and_then(|value| value.as_text())
            .map(str::to_string)
    }

    fn build(&self, locale: &str) -> MessageDict {
        let empty = MessageDict::new();
        let base = self.bases.get(locale).unwrap_or(&empty);
        let contributions = self.contributions.get(locale).into_iter().flatten();
        let merged = merge_locale(base, contributions, self.validation.get(locale));
        debug!(locale, keys = merged.len(), "merged locale dictionary");
        merged
    }
}

fn parse(locale: &str, source_name: &str, raw: &str) -> Result<MessageDict, LocaleError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| LocaleError::parse(locale, source_name, &e))?;
    MessageDict::from_json(&value).ok_or_else(|| LocaleError::not_an_object(locale, source_name))
}

/// Replace `{name}` placeholders with params; unknown names are left as-is.
fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| (*value).to_string())
        })
        .into_owned()
}
