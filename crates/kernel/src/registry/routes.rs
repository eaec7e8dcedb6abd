//! Route table flattening and path resolution.
//!
//! The composed route table keeps each module's nesting verbatim (shared
//! layouts need it). For matching, every record is also flattened into a
//! [`RouteMatcher`] carrying its full path pattern and the metadata of the
//! whole chain from the top-level route down to the record itself.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tally_sdk::prelude::*;

/// Transient landing screen shown while the session initializes.
pub const SPLASH_PATH: &str = "/splash";
/// Profile picker / password entry.
pub const LOGIN_PATH: &str = "/login";
/// First-run account creation.
pub const REGISTER_PATH: &str = "/register";
/// Home screen for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Owner label used in errors for routes that belong to the shell itself.
pub(crate) const SHELL_OWNER: &str = "shell";

/// Public routes owned by the shell rather than by a module.
pub fn shell_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", DASHBOARD_PATH),
        RouteRecord::new(SPLASH_PATH)
            .view(ViewRef::eager("Splash"))
            .layout(Layout::Blank),
        RouteRecord::new(LOGIN_PATH)
            .view(ViewRef::eager("Login"))
            .layout(Layout::Blank),
        RouteRecord::new(REGISTER_PATH)
            .view(ViewRef::eager("Register"))
            .layout(Layout::Blank),
    ]
}

/// A flattened route record ready for path matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    /// Full path pattern (e.g., "/finance/accounts", "/projects/:id").
    pub pattern: String,
    /// Module that declared the top-level route (None for shell routes).
    pub owner: Option<ModuleId>,
    /// Metadata from the top-level route down to this record.
    pub chain: Vec<RouteMeta>,
    pub view: Option<ViewRef>,
    pub redirect: Option<String>,
    /// Whether this record is an index child (shares its parent's path).
    pub is_index: bool,
    /// Position in depth-first registration order.
    order: usize,
}

impl RouteMatcher {
    pub fn depth(&self) -> usize {
        self.chain.len().saturating_sub(1)
    }

    pub fn param_count(&self) -> usize {
        self.pattern.matches(':').count()
    }

    /// True if any route in the chain requires authentication.
    pub fn requires_auth(&self) -> bool {
        self.chain.iter().any(|m| m.requires_auth)
    }

    /// The first module id in the chain, starting from the top-level route.
    pub fn module_id(&self) -> Option<&ModuleId> {
        self.chain.iter().find_map(|m| m.module_id.as_ref())
    }

    pub fn layout(&self) -> Option<Layout> {
        self.chain.iter().rev().find_map(|m| m.layout)
    }
}

/// Flatten `routes` depth-first into `out`, preserving declaration order.
pub(crate) fn flatten(routes: &[RouteRecord], owner: Option<&ModuleId>, out: &mut Vec<RouteMatcher>) {
    for route in routes {
        flatten_record(route, "", &[], owner, out);
    }
}

fn flatten_record(
    route: &RouteRecord,
    parent_path: &str,
    parent_chain: &[RouteMeta],
    owner: Option<&ModuleId>,
    out: &mut Vec<RouteMatcher>,
) {
    let pattern = join_path(parent_path, &route.path);
    let mut chain = parent_chain.to_vec();
    chain.push(route.meta.clone());

    out.push(RouteMatcher {
        pattern: pattern.clone(),
        owner: owner.cloned(),
        chain: chain.clone(),
        view: route.view.clone(),
        redirect: route.redirect.clone(),
        is_index: !parent_chain.is_empty() && route.is_index(),
        order: out.len(),
    });

    for child in &route.children {
        flatten_record(child, &pattern, &chain, owner, out);
    }
}

/// Pattern with every `:name` segment reduced to `:`.
///
/// Two patterns with the same canonical form match exactly the same paths.
pub(crate) fn canonical_pattern(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| if segment.starts_with(':') { ":" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a child path onto its parent's full path.
///
/// Absolute child paths stand alone; an empty child path is the parent's
/// index and resolves to the parent path itself.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        return normalize_path(child);
    }
    if child.is_empty() {
        return normalize_path(parent);
    }
    normalize_path(&format!("{}/{child}", parent.trim_end_matches('/')))
}

/// Strip query string, fragment and trailing slash (except for the root).
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/projects/:id"
/// Path: "/projects/42"
/// Result: Some({"id": "42"})
pub(crate) fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = BTreeMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            if actual.is_empty() {
                return None;
            }
            params.insert(param_name.to_string(), (*actual).to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}

/// A navigation target with its route metadata resolved.
///
/// This is what the guard decides on. Targets for paths that match no route
/// are public and have no owning module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Path as requested, including any query string (persisted verbatim).
    pub full_path: String,
    /// Pattern of the matched route, if any.
    pub pattern: Option<String>,
    pub params: BTreeMap<String, String>,
    pub requires_auth: bool,
    /// Owning module: the first entry of the matched route chain carrying one.
    pub module_id: Option<ModuleId>,
    pub redirect: Option<String>,
    pub layout: Option<Layout>,
    pub view: Option<ViewRef>,
}

impl NavigationTarget {
    /// A target that matched no route.
    pub fn unmatched(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            pattern: None,
            params: BTreeMap::new(),
            requires_auth: false,
            module_id: None,
            redirect: None,
            layout: None,
            view: None,
        }
    }

    /// A public target (no auth required).
    pub fn public(full_path: impl Into<String>) -> Self {
        Self::unmatched(full_path)
    }

    /// An auth-required target, optionally owned by a module.
    pub fn protected(full_path: impl Into<String>, module_id: Option<ModuleId>) -> Self {
        Self {
            requires_auth: true,
            module_id,
            ..Self::unmatched(full_path)
        }
    }

    /// Path portion of [`full_path`](Self::full_path), normalized.
    pub fn path(&self) -> String {
        normalize_path(&self.full_path)
    }

    pub fn is_splash(&self) -> bool {
        self.path() == SPLASH_PATH
    }

    fn from_match(full_path: &str, matcher: &RouteMatcher, params: BTreeMap<String, String>) -> Self {
        Self {
            full_path: full_path.to_string(),
            pattern: Some(matcher.pattern.clone()),
            params,
            requires_auth: matcher.requires_auth(),
            module_id: matcher.module_id().cloned(),
            redirect: matcher.redirect.clone(),
            layout: matcher.layout(),
            view: matcher.view.clone(),
        }
    }
}

/// Resolve `full_path` against the flattened matchers.
///
/// Preference: fewer params, then deeper nesting (an index child beats its
/// parent), then registration order.
pub(crate) fn resolve(matchers: &[RouteMatcher], full_path: &str) -> NavigationTarget {
    let path = normalize_path(full_path);

    matchers
        .iter()
        .filter_map(|m| match_pattern(&m.pattern, &path).map(|params| (m, params)))
        .min_by_key(|(m, _)| (m.param_count(), Reverse(m.depth()), m.order))
        .map(|(m, params)| NavigationTarget::from_match(full_path, m, params))
        .unwrap_or_else(|| NavigationTarget::unmatched(full_path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn finance_routes() -> Vec<RouteRecord> {
        vec![
            RouteRecord::page("/finance", ViewRef::eager("layout"), ModuleId::FINANCE)
                .child(RouteRecord::redirect("", "/finance/overview"))
                .child(RouteRecord::new("overview").view(ViewRef::eager("overview")))
                .child(RouteRecord::new("accounts").view(ViewRef::eager("accounts"))),
        ]
    }

    fn matchers() -> Vec<RouteMatcher> {
        let mut out = Vec::new();
        flatten(&shell_routes(), None, &mut out);
        flatten(&finance_routes(), Some(&ModuleId::FINANCE), &mut out);
        flatten(
            &[
                RouteRecord::page("/projects", ViewRef::lazy("p"), ModuleId::PROJECTS),
                RouteRecord::page("/projects/:id", ViewRef::lazy("pd"), ModuleId::PROJECTS),
            ],
            Some(&ModuleId::PROJECTS),
            &mut out,
        );
        out
    }

    #[test]
    fn join_path_handles_index_and_absolute_children() {
        assert_eq!(join_path("/finance", "accounts"), "/finance/accounts");
        assert_eq!(join_path("/finance", ""), "/finance");
        assert_eq!(join_path("/finance", "/elsewhere"), "/elsewhere");
        assert_eq!(join_path("/", "a"), "/a");
        assert_eq!(join_path("", "/dashboard"), "/dashboard");
    }

    #[test]
    fn normalize_path_strips_query_and_trailing_slash() {
        assert_eq!(normalize_path("/finance/?tab=1"), "/finance");
        assert_eq!(normalize_path("/reports#top"), "/reports");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn match_pattern_exact() {
        let params = match_pattern("/clients", "/clients");
        assert!(params.unwrap().is_empty());
    }

    #[test]
    fn match_pattern_with_param() {
        let params = match_pattern("/projects/:id", "/projects/42").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn match_pattern_no_match() {
        assert!(match_pattern("/clients", "/projects").is_none());
        assert!(match_pattern("/projects/:id", "/projects/1/2").is_none());
        assert!(match_pattern("/projects/:id", "/projects/").is_none());
    }

    #[test]
    fn flatten_preserves_chain() {
        let out = matchers();
        let accounts = out.iter().find(|m| m.pattern == "/finance/accounts").unwrap();
        assert_eq!(accounts.depth(), 1);
        assert!(accounts.requires_auth());
        assert_eq!(accounts.module_id(), Some(&ModuleId::FINANCE));
        assert_eq!(accounts.layout(), Some(Layout::Main));
    }

    #[test]
    fn module_id_comes_from_first_tagged_entry() {
        let mut out = Vec::new();
        flatten(
            &[RouteRecord::page("/settings", ViewRef::lazy("layout"), ModuleId::SETTINGS)
                .child(RouteRecord::new("finance").view(ViewRef::lazy("f")).module(ModuleId::FINANCE))],
            Some(&ModuleId::SETTINGS),
            &mut out,
        );
        let page = out.iter().find(|m| m.pattern == "/settings/finance").unwrap();
        assert_eq!(page.module_id(), Some(&ModuleId::SETTINGS));
    }

    #[test]
    fn canonical_pattern_ignores_param_names() {
        assert_eq!(canonical_pattern("/projects/:id"), canonical_pattern("/projects/:pid"));
        assert_eq!(canonical_pattern("/projects/:id/tasks"), "/projects/:/tasks");
        assert_ne!(canonical_pattern("/projects/:id"), canonical_pattern("/projects/new"));
    }

    #[test]
    fn index_child_wins_over_parent() {
        let target = resolve(&matchers(), "/finance");
        assert_eq!(target.redirect.as_deref(), Some("/finance/overview"));
        assert_eq!(target.module_id, Some(ModuleId::FINANCE));
        assert!(target.requires_auth);
    }

    #[test]
    fn static_route_wins_over_param_route() {
        let target = resolve(&matchers(), "/projects");
        assert_eq!(target.pattern.as_deref(), Some("/projects"));

        let target = resolve(&matchers(), "/projects/7?tab=time");
        assert_eq!(target.pattern.as_deref(), Some("/projects/:id"));
        assert_eq!(target.params.get("id"), Some(&"7".to_string()));
        assert_eq!(target.full_path, "/projects/7?tab=time");
    }

    #[test]
    fn unknown_path_is_public() {
        let target = resolve(&matchers(), "/nowhere");
        assert!(target.pattern.is_none());
        assert!(!target.requires_auth);
        assert!(target.module_id.is_none());
    }

    #[test]
    fn splash_is_detected_by_path() {
        assert!(resolve(&matchers(), "/splash").is_splash());
        assert!(NavigationTarget::public("/splash?from=boot").is_splash());
        assert!(!NavigationTarget::public("/login").is_splash());
    }
}
