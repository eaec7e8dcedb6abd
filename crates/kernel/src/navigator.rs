//! Navigation driver.
//!
//! [`Navigator`] is what a host calls when the user asks for a path. It
//! resolves the path, follows route and guard redirects, and hands back a
//! [`Navigation`] the host commits once it has actually switched views.
//! Only the most recent attempt may commit: a slow navigation overtaken by a
//! newer one is discarded together with its effects.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::guard::{self, GuardDecision, Outcome};
use crate::overrides::ModuleOverrides;
use crate::registry::{NavigationTarget, Registry};
use crate::session::{LAST_ROUTE_KEY, SessionState};
use crate::storage::{KeyValueStore, apply_effects};

/// Upper bound on redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// A resolved navigation attempt awaiting commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Sequence number of this attempt.
    pub ticket: u64,
    /// Path the host asked for.
    pub requested: String,
    /// Where the navigation ends up after redirects.
    pub target: NavigationTarget,
    /// Guard decision for [`target`](Self::target).
    pub decision: GuardDecision,
    /// Number of redirects followed.
    pub hops: usize,
}

impl Navigation {
    /// Final path to display.
    pub fn destination(&self) -> &str {
        &self.target.full_path
    }

    pub fn was_redirected(&self) -> bool {
        self.hops > 0
    }
}

/// Runs the guard for each navigation and applies effects on commit.
pub struct Navigator<S> {
    registry: Arc<Registry>,
    store: S,
    /// Ticket of the most recent attempt. Held while committing so a newer
    /// attempt cannot start between the ticket check and the writes.
    latest: Mutex<u64>,
}

impl<S: KeyValueStore> Navigator<S> {
    pub fn new(registry: Arc<Registry>, store: S) -> Self {
        Self {
            registry,
            store,
            latest: Mutex::new(0),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve and authorize a navigation to `path`.
    ///
    /// Route redirects and guard redirects are both followed, at most
    /// [`MAX_REDIRECTS`] times. If the bound is hit, the last target reached
    /// is returned with its own decision. Nothing is persisted until
    /// [`commit`](Self::commit).
    pub fn navigate(
        &self,
        path: &str,
        session: SessionState,
        overrides: Option<&ModuleOverrides>,
    ) -> Navigation {
        let ticket = {
            let mut latest = self.latest.lock();
            *latest += 1;
            *latest
        };

        let mut target = self.registry.resolve(path);
        let mut hops = 0;
        let decision = loop {
            let next = match &target.redirect {
                Some(to) => Some(to.clone()),
                None => {
                    let decision = guard::authorize(&target, session, &self.registry, overrides);
                    let redirect = match &decision.outcome {
                        Outcome::Redirect(to) if *to != target.path() => Some(to.clone()),
                        _ => None,
                    };
                    if redirect.is_none() {
                        break decision;
                    }
                    redirect
                }
            };

            match next {
                Some(to) if hops < MAX_REDIRECTS => {
                    hops += 1;
                    target = self.registry.resolve(&to);
                }
                _ => {
                    warn!(path, last = %target.full_path, "redirect limit reached");
                    break guard::authorize(&target, session, &self.registry, overrides);
                }
            }
        };

        debug!(ticket, path, destination = %target.full_path, hops, "navigation resolved");
        Navigation {
            ticket,
            requested: path.to_string(),
            target,
            decision,
            hops,
        }
    }

    /// Apply the navigation's effects if it is still the latest attempt.
    ///
    /// Returns `false` (and applies nothing) for superseded attempts.
    pub fn commit(&self, navigation: &Navigation) -> bool {
        let latest = self.latest.lock();
        if navigation.ticket != *latest {
            debug!(ticket = navigation.ticket, "discarding superseded navigation");
            return false;
        }
        apply_effects(&self.store, &navigation.decision.effects);
        true
    }

    /// Forget the persisted route and user.
    pub fn logout(&self) {
        apply_effects(&self.store, &guard::logout_effects());
    }

    /// The last authorized auth-required path, for session restore.
    pub fn restore_path(&self) -> Option<String> {
        self.store.get(LAST_ROUTE_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::compose;
    use crate::storage::MemoryStore;
    use tally_sdk::prelude::*;

    fn navigator() -> Navigator<MemoryStore> {
        let registry = compose(vec![
            ModuleDescriptor::new(ModuleId::DASHBOARD).route(RouteRecord::page(
                "/dashboard",
                ViewRef::eager("Dashboard"),
                ModuleId::DASHBOARD,
            )),
            ModuleDescriptor::new(ModuleId::new("loop"))
                .route(RouteRecord::redirect("/ping", "/pong"))
                .route(RouteRecord::redirect("/pong", "/ping")),
        ])
        .unwrap();
        Navigator::new(Arc::new(registry), MemoryStore::new())
    }

    #[test]
    fn root_redirects_to_dashboard() {
        let nav = navigator().navigate("/", SessionState::Authenticated, None);
        assert_eq!(nav.destination(), "/dashboard");
        assert_eq!(nav.hops, 1);
        assert!(nav.decision.outcome.is_allow());
    }

    #[test]
    fn guard_redirect_is_followed() {
        let nav = navigator().navigate("/dashboard", SessionState::Uninitialized, None);
        assert_eq!(nav.destination(), "/splash");
        assert!(nav.was_redirected());
        assert!(nav.decision.outcome.is_allow());
    }

    #[test]
    fn redirect_loop_stops_at_limit() {
        let nav = navigator().navigate("/ping", SessionState::Authenticated, None);
        assert_eq!(nav.hops, MAX_REDIRECTS);
    }

    #[test]
    fn tickets_increase() {
        let navigator = navigator();
        let first = navigator.navigate("/dashboard", SessionState::Authenticated, None);
        let second = navigator.navigate("/dashboard", SessionState::Authenticated, None);
        assert!(second.ticket > first.ticket);
        assert!(!navigator.commit(&first));
        assert!(navigator.commit(&second));
    }
}
