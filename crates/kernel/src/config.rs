//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};

use crate::overrides::UnknownModulePolicy;

/// Default interface locale.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Locale consulted when a key is missing from the active one.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en-US";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Locale used until the user picks one (default: zh-CN).
    pub default_locale: String,

    /// Fallback for missing translations (default: en-US).
    pub fallback_locale: String,

    /// Enablement answer for module ids the registry does not know
    /// (default: open).
    pub unknown_module_policy: UnknownModulePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
            unknown_module_policy: UnknownModulePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_locale = var("TALLY_DEFAULT_LOCALE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        if default_locale.is_empty() {
            bail!("TALLY_DEFAULT_LOCALE must not be empty");
        }

        let fallback_locale = var("TALLY_FALLBACK_LOCALE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FALLBACK_LOCALE.to_string());
        if fallback_locale.is_empty() {
            bail!("TALLY_FALLBACK_LOCALE must not be empty");
        }

        let unknown_module_policy = match var("TALLY_UNKNOWN_MODULE_POLICY") {
            Some(raw) => UnknownModulePolicy::parse(&raw)
                .with_context(|| format!("TALLY_UNKNOWN_MODULE_POLICY must be 'open' or 'closed', got '{raw}'"))?,
            None => UnknownModulePolicy::default(),
        };

        Ok(Self {
            default_locale,
            fallback_locale,
            unknown_module_policy,
        })
    }
}
