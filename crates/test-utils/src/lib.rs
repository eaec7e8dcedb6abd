//! Tally test utilities.
//!
//! Fixture builders for integration testing: module descriptors with
//! sensible defaults, and persisted-preference JSON as the shell receives it.

use serde_json::{Map, Value as JsonValue};
use tally_sdk::prelude::*;

/// Create a test module with default values.
///
/// The module is enabled, not toggleable, and owns a single authenticated
/// page at `/<id>` tagged with its own id.
pub fn test_module(id: &str) -> TestModule {
    TestModule {
        id: ModuleId::new(id),
        toggleable: false,
        enabled_by_default: true,
        path: format!("/{id}"),
        children: Vec::new(),
        nav: false,
        settings_order: None,
        messages: Vec::new(),
    }
}

/// A module descriptor builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestModule {
    pub id: ModuleId,
    pub toggleable: bool,
    pub enabled_by_default: bool,
    pub path: String,
    pub children: Vec<String>,
    pub nav: bool,
    pub settings_order: Option<i32>,
    pub messages: Vec<(String, MessageDict)>,
}

impl TestModule {
    /// Allow users to switch the module off.
    pub fn toggleable(mut self) -> Self {
        self.toggleable = true;
        self
    }

    /// Start switched off unless the user opts in.
    pub fn disabled_by_default(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    /// Set the page path.
    pub fn at(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Nest a child page under the module's page.
    pub fn with_child(mut self, segment: &str) -> Self {
        self.children.push(segment.to_string());
        self
    }

    /// Add a top-level nav entry with one child per nested page.
    pub fn with_nav(mut self) -> Self {
        self.nav = true;
        self
    }

    /// Contribute a settings page keyed by the module id.
    pub fn with_settings_page(mut self, order: i32) -> Self {
        self.settings_order = Some(order);
        self
    }

    /// Contribute messages for a locale.
    pub fn with_messages(mut self, locale: &str, messages: MessageDict) -> Self {
        self.messages.push((locale.to_string(), messages));
        self
    }

    /// Build the descriptor.
    pub fn build(self) -> ModuleDescriptor {
        let id = self.id.as_str().to_string();
        let mut route = RouteRecord::page(self.path.clone(), ViewRef::lazy(format!("{id}/Page")), self.id.clone());
        for segment in &self.children {
            route = route.child(RouteRecord::new(segment.clone()).view(ViewRef::lazy(format!("{id}/{segment}"))));
        }

        let mut module = ModuleDescriptor::new(self.id.clone())
            .toggleable(self.toggleable)
            .enabled_by_default(self.enabled_by_default)
            .route(route);

        if self.nav {
            let mut nav = NavItem::new(id.clone(), format!("nav.{id}"), IconRef::new("Placeholder"));
            for segment in &self.children {
                nav = nav.child(NavChild::new(format!("{id}/{segment}"), format!("{id}.nav.{segment}")));
            }
            module = module.nav(nav);
        }

        if let Some(order) = self.settings_order {
            module = module.settings_page(SettingsPage::new(
                id.clone(),
                format!("settings.{id}.title"),
                ViewRef::lazy(format!("settings/{id}")),
                order,
                self.id.clone(),
            ));
        }

        for (locale, messages) in self.messages {
            module = module.messages(locale, messages);
        }
        module
    }
}

/// Persisted preferences holding a `moduleOverrides` object.
pub fn prefs_with_overrides(entries: &[(&str, JsonValue)]) -> JsonValue {
    let overrides: Map<String, JsonValue> = entries
        .iter()
        .map(|(id, value)| ((*id).to_string(), value.clone()))
        .collect();
    serde_json::json!({ "moduleOverrides": overrides })
}

/// Boolean-only override object, as a well-behaved client would persist it.
pub fn override_map(entries: &[(&str, bool)]) -> Map<String, JsonValue> {
    entries
        .iter()
        .map(|(id, enabled)| ((*id).to_string(), JsonValue::Bool(*enabled)))
        .collect()
}
