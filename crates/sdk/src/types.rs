//! Core types for Tally modules.
//!
//! A [`ModuleDescriptor`] is the unit of registration. Descriptors are plain
//! data built with the builder methods below; the kernel never calls back
//! into a module.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::messages::{LocaleMessages, MessageDict};
use crate::route::RouteRecord;

/// Stable module identifier.
///
/// The built-in set is fixed at build time and exposed as associated
/// constants. Ids read back from persisted user preferences may name modules
/// that are no longer registered, so the type is an open string newtype
/// rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(Cow<'static, str>);

impl ModuleId {
    pub const DASHBOARD: Self = Self::from_static("dashboard");
    pub const CLIENTS: Self = Self::from_static("clients");
    pub const PROJECTS: Self = Self::from_static("projects");
    pub const TIMESHEET: Self = Self::from_static("timesheet");
    pub const INVOICES: Self = Self::from_static("invoices");
    pub const REPORTS: Self = Self::from_static("reports");
    pub const FINANCE: Self = Self::from_static("finance");
    pub const SETTINGS: Self = Self::from_static("settings");

    /// Every module id the application ships with, in registration order.
    pub const BUILT_IN: [Self; 8] = [
        Self::DASHBOARD,
        Self::CLIENTS,
        Self::PROJECTS,
        Self::TIMESHEET,
        Self::INVOICES,
        Self::REPORTS,
        Self::FINANCE,
        Self::SETTINGS,
    ];

    /// Create an id from a string known at compile time.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create an id from an owned string (e.g. a persisted preference key).
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id belongs to the built-in set.
    pub fn is_built_in(&self) -> bool {
        Self::BUILT_IN.iter().any(|id| id == self)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// How the host should load a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLoading {
    /// Bundled with the shell and available immediately.
    Eager,
    /// Loaded on first navigation.
    Lazy,
}

/// Renderer-agnostic reference to a view.
///
/// The kernel only carries the identifier around; turning it into something
/// renderable is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewRef {
    /// Stable view identifier (e.g., "finance/accounts").
    pub id: String,
    pub loading: ViewLoading,
}

impl ViewRef {
    pub fn eager(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            loading: ViewLoading::Eager,
        }
    }

    pub fn lazy(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            loading: ViewLoading::Lazy,
        }
    }

    pub fn is_lazy(&self) -> bool {
        self.loading == ViewLoading::Lazy
    }
}

/// Reference to an icon in the host's icon set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Top-level navigation entry contributed by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Message key for the label (e.g., "nav.finance").
    pub label_key: String,
    /// Menu key, also the route segment the entry points at.
    pub key: String,
    pub icon: IconRef,
    #[serde(default)]
    pub children: Vec<NavChild>,
}

impl NavItem {
    pub fn new(key: impl Into<String>, label_key: impl Into<String>, icon: IconRef) -> Self {
        Self {
            label_key: label_key.into(),
            key: key.into(),
            icon,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: NavChild) -> Self {
        self.children.push(child);
        self
    }
}

/// Second-level navigation entry.
///
/// Without an explicit module id a child belongs to the module that declared
/// its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavChild {
    pub label_key: String,
    pub key: String,
    #[serde(default)]
    pub module_id: Option<ModuleId>,
}

impl NavChild {
    pub fn new(key: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self {
            label_key: label_key.into(),
            key: key.into(),
            module_id: None,
        }
    }

    pub fn module(mut self, module_id: ModuleId) -> Self {
        self.module_id = Some(module_id);
        self
    }
}

/// A page rendered inside the shared settings layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPage {
    /// Route segment under `/settings`.
    pub key: String,
    pub label_key: String,
    pub view: ViewRef,
    /// Sort position (lower = earlier). Built-in pages use 10, 20, 30 and 40.
    pub order: i32,
    pub module_id: ModuleId,
}

impl SettingsPage {
    pub fn new(
        key: impl Into<String>,
        label_key: impl Into<String>,
        view: ViewRef,
        order: i32,
        module_id: ModuleId,
    ) -> Self {
        Self {
            key: key.into(),
            label_key: label_key.into(),
            view,
            order,
            module_id,
        }
    }
}

/// Everything a module contributes to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    pub enabled_by_default: bool,
    /// When false the module is always enabled and user overrides are ignored.
    pub toggleable: bool,
    #[serde(default)]
    pub nav: Option<NavItem>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub settings_pages: Vec<SettingsPage>,
    #[serde(default)]
    pub messages: Option<LocaleMessages>,
}

impl ModuleDescriptor {
    /// A module that is enabled by default and cannot be switched off.
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            enabled_by_default: true,
            toggleable: false,
            nav: None,
            routes: Vec::new(),
            settings_pages: Vec::new(),
            messages: None,
        }
    }

    pub fn toggleable(mut self, toggleable: bool) -> Self {
        self.toggleable = toggleable;
        self
    }

    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }

    pub fn nav(mut self, nav: NavItem) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn route(mut self, route: RouteRecord) -> Self {
        self.routes.push(route);
        self
    }

    pub fn settings_page(mut self, page: SettingsPage) -> Self {
        self.settings_pages.push(page);
        self
    }

    /// Add (or replace) the partial dictionary for one locale.
    pub fn messages(mut self, locale: impl Into<String>, dict: MessageDict) -> Self {
        self.messages
            .get_or_insert_with(LocaleMessages::new)
            .insert(locale.into(), dict);
        self
    }
}
