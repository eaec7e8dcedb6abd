//! Registry composition.
//!
//! Folds the ordered, compiled-in module list into one immutable
//! [`Registry`]. Composition is pure: the same list always yields an equal
//! registry, and any conflict in the list is reported before the shell
//! handles a single navigation.

use std::collections::{BTreeMap, HashMap, HashSet};

use tally_sdk::prelude::*;
use tracing::debug;

use super::error::RegistryError;
use super::routes::{self, NavigationTarget, RouteMatcher, SHELL_OWNER};
use super::settings;
use crate::overrides::{ModuleOverrides, UnknownModulePolicy, is_module_enabled};
use crate::view::ViewResolver;

/// A composed top-level navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Module that declared the entry.
    pub module_id: ModuleId,
    pub label_key: String,
    pub key: String,
    pub icon: IconRef,
    pub children: Vec<NavChildEntry>,
}

/// A composed second-level navigation entry with its owning module resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavChildEntry {
    pub label_key: String,
    pub key: String,
    pub module_id: ModuleId,
}

impl NavEntry {
    fn from_module(module_id: &ModuleId, nav: &NavItem) -> Self {
        Self {
            module_id: module_id.clone(),
            label_key: nav.label_key.clone(),
            key: nav.key.clone(),
            icon: nav.icon.clone(),
            children: nav
                .children
                .iter()
                .map(|child| NavChildEntry {
                    label_key: child.label_key.clone(),
                    key: child.key.clone(),
                    module_id: child.module_id.clone().unwrap_or_else(|| module_id.clone()),
                })
                .collect(),
        }
    }
}

/// One module's partial dictionary for a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContribution {
    pub module_id: ModuleId,
    pub messages: MessageDict,
}

/// The composed, immutable view of every registered module.
///
/// Built once by [`compose`] and shared by reference (usually behind an
/// `Arc`) with everything that needs navigation, routes, settings pages or
/// messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    modules: Vec<ModuleDescriptor>,
    index: BTreeMap<ModuleId, usize>,
    nav_items: Vec<NavEntry>,
    route_table: Vec<RouteRecord>,
    settings_pages: Vec<SettingsPage>,
    messages_by_locale: BTreeMap<String, Vec<MessageContribution>>,
    matchers: Vec<RouteMatcher>,
}

/// Compose the registry from descriptors in registration order.
///
/// The settings module is synthesized from the built-in settings pages and
/// every page the descriptors contribute, and registered last. Descriptors
/// must therefore not use the `settings` id themselves.
///
/// # Errors
/// Returns an error if:
/// - two descriptors share an id (or one claims `settings`)
/// - two routes resolve to the same full path
/// - an authenticated route of a toggleable module has no module id in its chain
pub fn compose(descriptors: Vec<ModuleDescriptor>) -> Result<Registry, RegistryError> {
    let mut seen = HashSet::new();
    for module in &descriptors {
        if module.id == ModuleId::SETTINGS || !seen.insert(module.id.clone()) {
            return Err(RegistryError::duplicate_module(module.id.as_str()));
        }
    }

    let contributed: Vec<SettingsPage> = descriptors
        .iter()
        .flat_map(|m| m.settings_pages.iter().cloned())
        .collect();
    let (settings_module, settings_pages) = settings::compose_settings(contributed);

    let mut modules = descriptors;
    modules.push(settings_module);

    let index = modules
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id.clone(), i))
        .collect();

    let nav_items: Vec<NavEntry> = modules
        .iter()
        .filter_map(|m| m.nav.as_ref().map(|nav| NavEntry::from_module(&m.id, nav)))
        .collect();

    let shell_routes = routes::shell_routes();
    let mut matchers = Vec::new();
    routes::flatten(&shell_routes, None, &mut matchers);
    for module in &modules {
        routes::flatten(&module.routes, Some(&module.id), &mut matchers);
    }

    let mut route_table = shell_routes;
    route_table.extend(modules.iter().flat_map(|m| m.routes.iter().cloned()));

    check_unique_paths(&matchers)?;
    check_gated(&modules, &matchers)?;

    let mut messages_by_locale: BTreeMap<String, Vec<MessageContribution>> = BTreeMap::new();
    for module in &modules {
        let Some(messages) = &module.messages else {
            continue;
        };
        for (locale, dict) in messages {
            messages_by_locale
                .entry(locale.clone())
                .or_default()
                .push(MessageContribution {
                    module_id: module.id.clone(),
                    messages: dict.clone(),
                });
        }
    }

    debug!(
        modules = modules.len(),
        nav_items = nav_items.len(),
        routes = matchers.len(),
        settings_pages = settings_pages.len(),
        locales = messages_by_locale.len(),
        "composed module registry"
    );

    Ok(Registry {
        modules,
        index,
        nav_items,
        route_table,
        settings_pages,
        messages_by_locale,
        matchers,
    })
}

/// Full paths must be unique, up to parameter names. Index children share
/// their parent's path and are skipped.
fn check_unique_paths(matchers: &[RouteMatcher]) -> Result<(), RegistryError> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    for matcher in matchers.iter().filter(|m| !m.is_index) {
        let owner = owner_label(matcher);
        if let Some(first) = owners.insert(routes::canonical_pattern(&matcher.pattern), owner) {
            return Err(RegistryError::duplicate_path(&matcher.pattern, first, owner));
        }
    }
    Ok(())
}

/// Every authenticated route of a toggleable module needs a module id
/// somewhere in its chain, otherwise disabling the module would not gate it.
fn check_gated(modules: &[ModuleDescriptor], matchers: &[RouteMatcher]) -> Result<(), RegistryError> {
    let toggleable: HashSet<&ModuleId> = modules.iter().filter(|m| m.toggleable).map(|m| &m.id).collect();

    for matcher in matchers {
        let Some(owner) = &matcher.owner else {
            continue;
        };
        if toggleable.contains(owner) && matcher.requires_auth() && matcher.module_id().is_none() {
            return Err(RegistryError::UngatedRoute {
                module: owner.to_string(),
                path: matcher.pattern.clone(),
            });
        }
    }
    Ok(())
}

fn owner_label(matcher: &RouteMatcher) -> &str {
    matcher.owner.as_ref().map_or(SHELL_OWNER, ModuleId::as_str)
}

impl Registry {
    /// Registered modules in registration order (settings last).
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Look up a module by id.
    pub fn module(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.index.get(id).and_then(|&i| self.modules.get(i))
    }

    /// One navigation entry per module that declared one, in registration order.
    pub fn nav_items(&self) -> &[NavEntry] {
        &self.nav_items
    }

    /// Top-level routes with their nesting intact: shell routes first, then
    /// each module's routes in registration order.
    pub fn route_table(&self) -> &[RouteRecord] {
        &self.route_table
    }

    /// Every route record, flattened with its full path and chain metadata.
    pub fn matchers(&self) -> &[RouteMatcher] {
        &self.matchers
    }

    /// Built-in settings pages followed by contributed pages in sort order.
    pub fn settings_pages(&self) -> &[SettingsPage] {
        &self.settings_pages
    }

    /// Raw per-module message contributions, per locale, in registration order.
    pub fn messages_by_locale(&self) -> &BTreeMap<String, Vec<MessageContribution>> {
        &self.messages_by_locale
    }

    /// Contributions for one locale (empty if no module ships that locale).
    pub fn contributions(&self, locale: &str) -> &[MessageContribution] {
        self.messages_by_locale
            .get(locale)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the module with `id` is enabled for the user.
    ///
    /// Ids the registry does not know (a stale persisted reference, say)
    /// resolve to enabled.
    pub fn is_module_id_enabled(&self, id: &str, overrides: Option<&ModuleOverrides>) -> bool {
        self.is_module_id_enabled_with(id, overrides, UnknownModulePolicy::Open)
    }

    /// [`is_module_id_enabled`](Self::is_module_id_enabled) with an explicit
    /// answer for unknown ids.
    pub fn is_module_id_enabled_with(
        &self,
        id: &str,
        overrides: Option<&ModuleOverrides>,
        unknown: UnknownModulePolicy,
    ) -> bool {
        match self.module(id) {
            Some(module) => is_module_enabled(module, overrides),
            None => unknown.allows_unknown(),
        }
    }

    /// Navigation entries for enabled modules, with children of disabled
    /// modules removed.
    pub fn visible_nav(&self, overrides: Option<&ModuleOverrides>) -> Vec<NavEntry> {
        self.nav_items
            .iter()
            .filter(|entry| self.is_module_id_enabled(entry.module_id.as_str(), overrides))
            .map(|entry| NavEntry {
                children: entry
                    .children
                    .iter()
                    .filter(|c| self.is_module_id_enabled(c.module_id.as_str(), overrides))
                    .cloned()
                    .collect(),
                ..entry.clone()
            })
            .collect()
    }

    /// Settings pages whose owning module is enabled.
    pub fn visible_settings_pages(&self, overrides: Option<&ModuleOverrides>) -> Vec<&SettingsPage> {
        self.settings_pages
            .iter()
            .filter(|p| self.is_module_id_enabled(p.module_id.as_str(), overrides))
            .collect()
    }

    /// Resolve a requested path to a navigation target.
    pub fn resolve(&self, full_path: &str) -> NavigationTarget {
        routes::resolve(&self.matchers, full_path)
    }

    /// Check that the host can resolve every view the registry references.
    ///
    /// Meant to run once at startup, right after composition.
    pub fn check_views<R: ViewResolver>(&self, resolver: &R) -> Result<(), RegistryError> {
        let route_views = self
            .matchers
            .iter()
            .filter_map(|m| m.view.as_ref().map(|v| (owner_label(m), v)));
        let page_views = self
            .settings_pages
            .iter()
            .map(|p| (p.module_id.as_str(), &p.view));

        for (owner, view) in route_views.chain(page_views) {
            if !resolver.can_resolve(view) {
                return Err(RegistryError::UnresolvedView {
                    module: owner.to_string(),
                    view: view.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn finance() -> ModuleDescriptor {
        ModuleDescriptor::new(ModuleId::FINANCE)
            .toggleable(true)
            .nav(
                NavItem::new("finance", "nav.finance", IconRef::new("Wallet"))
                    .child(NavChild::new("finance/accounts", "finance.nav.accounts")),
            )
            .route(
                RouteRecord::page("/finance", ViewRef::eager("FinanceLayout"), ModuleId::FINANCE)
                    .child(RouteRecord::new("accounts").view(ViewRef::eager("Accounts"))),
            )
            .settings_page(SettingsPage::new(
                "finance",
                "settings.finance.title",
                ViewRef::eager("FinanceSettings"),
                50,
                ModuleId::FINANCE,
            ))
            .messages("en-US", MessageDict::new().with("nav.finance", "Finance"))
    }

    fn clients() -> ModuleDescriptor {
        ModuleDescriptor::new(ModuleId::CLIENTS)
            .nav(NavItem::new("clients", "nav.clients", IconRef::new("User")))
            .route(RouteRecord::page("/clients", ViewRef::lazy("Clients"), ModuleId::CLIENTS))
    }

    #[test]
    fn nav_follows_registration_order_with_settings_last() {
        let registry = compose(vec![clients(), finance()]).unwrap();
        let keys: Vec<_> = registry.nav_items().iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["clients", "finance", "settings"]);
    }

    #[test]
    fn nav_children_inherit_parent_module() {
        let registry = compose(vec![finance()]).unwrap();
        let child = &registry.nav_items()[0].children[0];
        assert_eq!(child.module_id, ModuleId::FINANCE);
    }

    #[test]
    fn route_table_keeps_nesting() {
        let registry = compose(vec![clients(), finance()]).unwrap();
        let finance_route = registry
            .route_table()
            .iter()
            .find(|r| r.path == "/finance")
            .unwrap();
        assert_eq!(finance_route.children.len(), 1);
        assert_eq!(finance_route.children[0].path, "accounts");
        // shell routes come first
        assert_eq!(registry.route_table()[0].path, "/");
    }

    #[test]
    fn duplicate_module_is_rejected() {
        let err = compose(vec![clients(), clients()]).unwrap_err();
        assert_eq!(err, RegistryError::duplicate_module("clients"));
    }

    #[test]
    fn settings_id_is_reserved() {
        let err = compose(vec![ModuleDescriptor::new(ModuleId::SETTINGS)]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateModule { .. }));
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let shadow = ModuleDescriptor::new(ModuleId::REPORTS).route(RouteRecord::page(
            "/clients",
            ViewRef::lazy("Reports"),
            ModuleId::REPORTS,
        ));
        let err = compose(vec![clients(), shadow]).unwrap_err();
        assert_eq!(err, RegistryError::duplicate_path("/clients", "clients", "reports"));
    }

    #[test]
    fn param_names_do_not_make_paths_distinct() {
        let projects = ModuleDescriptor::new(ModuleId::PROJECTS).route(RouteRecord::page(
            "/projects/:id",
            ViewRef::lazy("Project"),
            ModuleId::PROJECTS,
        ));
        let tasks = ModuleDescriptor::new(ModuleId::new("tasks")).route(RouteRecord::page(
            "/projects/:pid",
            ViewRef::lazy("Tasks"),
            ModuleId::new("tasks"),
        ));
        let err = compose(vec![projects, tasks]).unwrap_err();
        assert_eq!(err, RegistryError::duplicate_path("/projects/:pid", "projects", "tasks"));
    }

    #[test]
    fn module_cannot_shadow_shell_route() {
        let shadow = ModuleDescriptor::new(ModuleId::REPORTS)
            .route(RouteRecord::new("/login").view(ViewRef::lazy("Login")));
        let err = compose(vec![shadow]).unwrap_err();
        assert_eq!(err, RegistryError::duplicate_path("/login", "shell", "reports"));
    }

    #[test]
    fn ungated_route_of_toggleable_module_is_rejected() {
        let module = ModuleDescriptor::new(ModuleId::FINANCE)
            .toggleable(true)
            .route(RouteRecord::new("/finance").view(ViewRef::lazy("F")).requires_auth());
        let err = compose(vec![module]).unwrap_err();
        assert!(matches!(err, RegistryError::UngatedRoute { .. }));
    }

    #[test]
    fn ungated_route_of_fixed_module_is_allowed() {
        let module = ModuleDescriptor::new(ModuleId::REPORTS)
            .route(RouteRecord::new("/reports").view(ViewRef::lazy("R")).requires_auth());
        assert!(compose(vec![module]).is_ok());
    }

    #[test]
    fn messages_are_collected_not_merged() {
        let registry = compose(vec![finance(), clients()]).unwrap();
        let contributions = registry.contributions("en-US");
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].module_id, ModuleId::FINANCE);
        assert!(registry.contributions("fr-FR").is_empty());
    }

    #[test]
    fn unknown_module_is_fail_open_by_default() {
        let registry = compose(vec![finance()]).unwrap();
        let overrides = ModuleOverrides::new().with(ModuleId::FINANCE, false);
        assert!(registry.is_module_id_enabled("timesheet", Some(&overrides)));
        assert!(!registry.is_module_id_enabled_with("timesheet", None, UnknownModulePolicy::Closed));
        assert!(!registry.is_module_id_enabled("finance", Some(&overrides)));
    }

    #[test]
    fn visible_nav_hides_disabled_modules() {
        let registry = compose(vec![clients(), finance()]).unwrap();
        let overrides = ModuleOverrides::new().with(ModuleId::FINANCE, false);
        let visible = registry.visible_nav(Some(&overrides));
        let keys: Vec<_> = visible.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["clients", "settings"]);
        let settings_children: Vec<_> = visible[1].children.iter().map(|c| c.key.as_str()).collect();
        assert!(!settings_children.contains(&"settings/finance"));

        let pages = registry.visible_settings_pages(Some(&overrides));
        assert_eq!(pages.len(), 4);
    }
}
