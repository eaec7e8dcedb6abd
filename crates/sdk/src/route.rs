//! Route records contributed by modules.
//!
//! Routes nest: a parent renders a shared layout and its children render
//! inside it. Child paths are relative to the parent; an empty child path is
//! the parent's index route.

use serde::{Deserialize, Serialize};

use crate::types::{ModuleId, ViewRef};

/// Page chrome a route renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Sidebar + header application chrome.
    Main,
    /// Bare full-screen layout (splash, login, registration).
    Blank,
}

/// Route metadata consulted by the navigation guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub layout: Option<Layout>,
    /// Module owning this route; used to gate navigation on enablement.
    #[serde(default)]
    pub module_id: Option<ModuleId>,
}

/// A route definition from a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Absolute path for top-level routes ("/finance"), relative for
    /// children ("accounts", "" for the index). `:name` segments are params.
    pub path: String,
    #[serde(default)]
    pub view: Option<ViewRef>,
    /// Target path when this route only redirects.
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: None,
            redirect: None,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// An authenticated page in the main layout owned by `module`.
    pub fn page(path: impl Into<String>, view: ViewRef, module: ModuleId) -> Self {
        Self::new(path)
            .view(view)
            .requires_auth()
            .layout(Layout::Main)
            .module(module)
    }

    /// A route that only forwards to another path.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        let mut route = Self::new(path);
        route.redirect = Some(to.into());
        route
    }

    pub fn view(mut self, view: ViewRef) -> Self {
        self.view = Some(view);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.meta.layout = Some(layout);
        self
    }

    pub fn module(mut self, module: ModuleId) -> Self {
        self.meta.module_id = Some(module);
        self
    }

    pub fn child(mut self, child: RouteRecord) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this is an index child (empty relative path).
    pub fn is_index(&self) -> bool {
        self.path.is_empty()
    }
}
