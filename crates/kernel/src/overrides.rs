//! Per-user module enablement.
//!
//! Users may switch toggleable modules on or off. Their decisions are stored
//! as a sparse override map inside the persisted preferences blob, which is
//! arbitrary JSON by the time it reaches the shell, so it is normalized
//! before use. Nothing here fails: malformed input degrades to the most
//! permissive answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_sdk::types::{ModuleDescriptor, ModuleId};
use tracing::warn;

/// Sparse map of explicit user decisions (module id -> enabled).
///
/// An absent key means the user never decided; the module's default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleOverrides(BTreeMap<ModuleId, bool>);

impl ModuleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, id: ModuleId, enabled: bool) -> Self {
        self.set(id, enabled);
        self
    }

    pub fn set(&mut self, id: ModuleId, enabled: bool) {
        self.0.insert(id, enabled);
    }

    /// The explicit decision for `id`, if the user made one.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, bool)> {
        self.0.iter().map(|(id, enabled)| (id, *enabled))
    }
}

impl FromIterator<(ModuleId, bool)> for ModuleOverrides {
    fn from_iter<I: IntoIterator<Item = (ModuleId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What to answer for module ids the registry does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownModulePolicy {
    /// Treat unknown ids as enabled. A stale preference must never lock a
    /// user out of the application.
    #[default]
    Open,
    /// Treat unknown ids as disabled.
    Closed,
}

impl UnknownModulePolicy {
    /// Parse a policy name ("open" or "closed", case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub(crate) fn allows_unknown(self) -> bool {
        self == Self::Open
    }
}

/// Keep only boolean entries of a raw override object.
///
/// Non-boolean values are dropped silently. Returns `None` when nothing
/// survives, so "no customizations" and "customizations that happened to be
/// empty" look the same to callers that branch on presence.
pub fn normalize_module_overrides(
    raw: Option<&serde_json::Map<String, serde_json::Value>>,
) -> Option<ModuleOverrides> {
    let raw = raw?;
    let overrides: ModuleOverrides = raw
        .iter()
        .filter_map(|(key, value)| value.as_bool().map(|enabled| (ModuleId::new(key.as_str()), enabled)))
        .collect();

    let dropped = raw.len() - overrides.len();
    if dropped > 0 {
        warn!(dropped, "ignored non-boolean module override entries");
    }

    (!overrides.is_empty()).then_some(overrides)
}

/// [`normalize_module_overrides`] for any JSON value; non-objects give `None`.
pub fn normalize_module_overrides_value(raw: &serde_json::Value) -> Option<ModuleOverrides> {
    normalize_module_overrides(raw.as_object())
}

/// Whether `module` is enabled given the user's overrides.
///
/// Modules that are not toggleable are always enabled, whatever the
/// overrides say.
pub fn is_module_enabled(module: &ModuleDescriptor, overrides: Option<&ModuleOverrides>) -> bool {
    if !module.toggleable {
        return true;
    }
    overrides
        .and_then(|o| o.get(module.id.as_str()))
        .unwrap_or(module.enabled_by_default)
}
