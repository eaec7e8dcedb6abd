//! Shell initialization.
//!
//! The host calls [`Shell::init`] once at startup and passes the resulting
//! registry, catalog and navigator to whatever needs them. There is no
//! global registry.

use std::sync::Arc;

use anyhow::{Context, Result};
use tally_sdk::types::ModuleDescriptor;
use tracing::info;

use crate::config::Config;
use crate::locale::LocaleCatalog;
use crate::modules::builtin_descriptors;
use crate::navigator::Navigator;
use crate::overrides::{ModuleOverrides, UnknownModulePolicy};
use crate::registry::{NavEntry, Registry, compose};
use crate::storage::KeyValueStore;

/// The initialized shell.
pub struct Shell {
    config: Config,
    registry: Arc<Registry>,
    catalog: LocaleCatalog,
}

impl Shell {
    /// Compose the built-in modules and load the shipped dictionaries.
    ///
    /// # Errors
    /// Fails if the module set conflicts or a shipped dictionary is
    /// malformed. Both are build defects; the host should abort.
    pub fn init(config: Config) -> Result<Self> {
        Self::with_descriptors(config, builtin_descriptors())
    }

    /// Like [`init`](Self::init) with an explicit module list.
    pub fn with_descriptors(config: Config, descriptors: Vec<ModuleDescriptor>) -> Result<Self> {
        let registry = compose(descriptors).context("failed to compose module registry")?;
        let catalog = LocaleCatalog::shipped(&registry, config.fallback_locale.clone())
            .context("failed to load shipped locale dictionaries")?;

        info!(
            modules = registry.modules().len(),
            locales = catalog.locales().len(),
            default_locale = %config.default_locale,
            "shell initialized"
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
            catalog,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// A navigator over this shell's registry, persisting through `store`.
    pub fn navigator<S: KeyValueStore>(&self, store: S) -> Navigator<S> {
        Navigator::new(Arc::clone(&self.registry), store)
    }

    /// Whether module `id` is enabled, honoring the configured policy for
    /// unknown ids.
    pub fn is_module_enabled(&self, id: &str, overrides: Option<&ModuleOverrides>) -> bool {
        self.registry
            .is_module_id_enabled_with(id, overrides, self.config.unknown_module_policy)
    }

    /// Navigation to render for the user.
    pub fn visible_nav(&self, overrides: Option<&ModuleOverrides>) -> Vec<NavEntry> {
        self.registry.visible_nav(overrides)
    }

    /// Translate in the configured default locale.
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.catalog
            .translate(&self.config.default_locale, key, params)
    }

    pub fn unknown_module_policy(&self) -> UnknownModulePolicy {
        self.config.unknown_module_policy
    }
}
