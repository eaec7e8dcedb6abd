//! Session state as seen by the navigation guard.
//!
//! The shell does not own authentication. It receives a snapshot of three
//! signals from the auth collaborator and collapses them into the one state
//! the guard branches on.

use serde::{Deserialize, Serialize};

/// Storage key holding the last authorized auth-required path.
pub const LAST_ROUTE_KEY: &str = "lastRoutePath";

/// Storage key holding the id of the signed-in user.
pub const SESSION_USER_KEY: &str = "currentUserId";

/// Session state at the moment a navigation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// The auth collaborator has not finished loading.
    Uninitialized,
    /// Signed out and no local account exists yet.
    UnauthenticatedNoAccounts,
    /// Signed out with at least one local account to pick from.
    UnauthenticatedHasAccounts,
    Authenticated,
}

/// Raw signals reported by the auth collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSignals {
    pub is_initialized: bool,
    pub is_authenticated: bool,
    pub account_count: usize,
}

impl SessionState {
    /// Collapse collaborator signals into a session state.
    ///
    /// Initialization is checked first: an uninitialized collaborator may
    /// still report stale auth flags.
    pub fn from_signals(signals: SessionSignals) -> Self {
        if !signals.is_initialized {
            Self::Uninitialized
        } else if signals.is_authenticated {
            Self::Authenticated
        } else if signals.account_count == 0 {
            Self::UnauthenticatedNoAccounts
        } else {
            Self::UnauthenticatedHasAccounts
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

impl From<SessionSignals> for SessionState {
    fn from(signals: SessionSignals) -> Self {
        Self::from_signals(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(is_initialized: bool, is_authenticated: bool, account_count: usize) -> SessionSignals {
        SessionSignals {
            is_initialized,
            is_authenticated,
            account_count,
        }
    }

    #[test]
    fn uninitialized_wins_over_stale_auth() {
        assert_eq!(SessionState::from(signals(false, true, 3)), SessionState::Uninitialized);
    }

    #[test]
    fn authenticated_ignores_account_count() {
        assert_eq!(SessionState::from(signals(true, true, 0)), SessionState::Authenticated);
    }

    #[test]
    fn unauthenticated_splits_on_account_count() {
        assert_eq!(
            SessionState::from(signals(true, false, 0)),
            SessionState::UnauthenticatedNoAccounts
        );
        assert_eq!(
            SessionState::from(signals(true, false, 2)),
            SessionState::UnauthenticatedHasAccounts
        );
    }
}
