//! Route authorization guard.
//!
//! [`authorize`] decides whether a navigation may proceed. It performs no
//! I/O: persistence the decision implies is returned as [`Effect`]s, which
//! the caller applies only once it has committed to the navigation.

use tracing::debug;

use crate::overrides::ModuleOverrides;
use crate::registry::{DASHBOARD_PATH, LOGIN_PATH, NavigationTarget, REGISTER_PATH, Registry, SPLASH_PATH};
use crate::session::{LAST_ROUTE_KEY, SESSION_USER_KEY, SessionState};

/// Whether the navigation proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    /// Navigate to this path instead.
    Redirect(String),
}

impl Outcome {
    fn redirect(path: &str) -> Self {
        Self::Redirect(path.to_string())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A storage write implied by a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Store { key: String, value: String },
    Remove { key: String },
}

impl Effect {
    pub fn store(key: &str, value: impl Into<String>) -> Self {
        Self::Store {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn remove(key: &str) -> Self {
        Self::Remove { key: key.to_string() }
    }
}

/// The guard's answer: an outcome plus effects to apply on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl GuardDecision {
    fn allow() -> Self {
        Self {
            outcome: Outcome::Allow,
            effects: Vec::new(),
        }
    }

    fn redirect(path: &str) -> Self {
        Self {
            outcome: Outcome::redirect(path),
            effects: Vec::new(),
        }
    }

    /// Allow and remember the path for session restore.
    fn allow_and_remember(full_path: &str) -> Self {
        Self {
            outcome: Outcome::Allow,
            effects: vec![Effect::store(LAST_ROUTE_KEY, full_path)],
        }
    }
}

/// Decide whether navigation to `target` may proceed.
///
/// First matching rule wins:
/// 1. auth required, session uninitialized: go to splash
/// 2. auth required, signed out with accounts: go to login
/// 3. auth required, signed out without accounts: go to register
/// 4. public target (other than splash) while signed in: go to dashboard
/// 5. auth required while signed in: go to dashboard if the owning module is
///    disabled, otherwise allow
/// 6. anything else is allowed
///
/// Every allowed auth-required navigation stores its full path under
/// [`LAST_ROUTE_KEY`].
pub fn authorize(
    target: &NavigationTarget,
    session: SessionState,
    registry: &Registry,
    overrides: Option<&ModuleOverrides>,
) -> GuardDecision {
    let decision = match (target.requires_auth, session) {
        (true, SessionState::Uninitialized) => GuardDecision::redirect(SPLASH_PATH),
        (true, SessionState::UnauthenticatedHasAccounts) => GuardDecision::redirect(LOGIN_PATH),
        (true, SessionState::UnauthenticatedNoAccounts) => GuardDecision::redirect(REGISTER_PATH),
        (false, SessionState::Authenticated) if !target.is_splash() => GuardDecision::redirect(DASHBOARD_PATH),
        (true, SessionState::Authenticated) => match &target.module_id {
            Some(id) if !registry.is_module_id_enabled(id.as_str(), overrides) => {
                debug!(module = %id, path = %target.full_path, "module disabled for user");
                GuardDecision::redirect(DASHBOARD_PATH)
            }
            _ => GuardDecision::allow_and_remember(&target.full_path),
        },
        _ => GuardDecision::allow(),
    };

    debug!(
        path = %target.full_path,
        session = ?session,
        requires_auth = target.requires_auth,
        outcome = ?decision.outcome,
        "navigation guard decision"
    );
    decision
}

/// Effects to apply when the user signs out.
pub fn logout_effects() -> Vec<Effect> {
    vec![Effect::remove(LAST_ROUTE_KEY), Effect::remove(SESSION_USER_KEY)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::compose;
    use tally_sdk::prelude::*;

    fn registry() -> Registry {
        compose(vec![
            ModuleDescriptor::new(ModuleId::DASHBOARD).route(RouteRecord::page(
                "/dashboard",
                ViewRef::eager("Dashboard"),
                ModuleId::DASHBOARD,
            )),
            ModuleDescriptor::new(ModuleId::FINANCE)
                .toggleable(true)
                .route(RouteRecord::page("/finance", ViewRef::eager("Finance"), ModuleId::FINANCE)),
        ])
        .unwrap()
    }

    #[test]
    fn public_targets_are_allowed_when_signed_out() {
        let registry = registry();
        for session in [
            SessionState::Uninitialized,
            SessionState::UnauthenticatedHasAccounts,
            SessionState::UnauthenticatedNoAccounts,
        ] {
            let decision = authorize(&registry.resolve("/login"), session, &registry, None);
            assert_eq!(decision, GuardDecision::allow());
        }
    }

    #[test]
    fn splash_is_allowed_when_signed_in() {
        let registry = registry();
        let decision = authorize(&registry.resolve("/splash"), SessionState::Authenticated, &registry, None);
        assert!(decision.outcome.is_allow());
        assert!(decision.effects.is_empty());
    }

    #[test]
    fn allowed_protected_navigation_remembers_full_path() {
        let registry = registry();
        let decision = authorize(
            &registry.resolve("/finance?tab=2"),
            SessionState::Authenticated,
            &registry,
            None,
        );
        assert_eq!(decision.effects, vec![Effect::store(LAST_ROUTE_KEY, "/finance?tab=2")]);
    }

    #[test]
    fn disabled_module_redirect_has_no_effects() {
        let registry = registry();
        let overrides = ModuleOverrides::new().with(ModuleId::FINANCE, false);
        let decision = authorize(
            &registry.resolve("/finance"),
            SessionState::Authenticated,
            &registry,
            Some(&overrides),
        );
        assert_eq!(decision.outcome, Outcome::Redirect(DASHBOARD_PATH.to_string()));
        assert!(decision.effects.is_empty());
    }

    #[test]
    fn stale_module_id_is_allowed() {
        let registry = registry();
        let target = NavigationTarget::protected("/archive", Some(ModuleId::new("archive")));
        let overrides = ModuleOverrides::new().with(ModuleId::new("other"), false);
        let decision = authorize(&target, SessionState::Authenticated, &registry, Some(&overrides));
        assert!(decision.outcome.is_allow());
    }

    #[test]
    fn logout_clears_both_keys() {
        assert_eq!(
            logout_effects(),
            vec![Effect::remove(LAST_ROUTE_KEY), Effect::remove(SESSION_USER_KEY)]
        );
    }
}
