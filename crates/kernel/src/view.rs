//! Host-side view resolution.

use tally_sdk::types::ViewRef;

/// Resolves view references to something the host can render.
///
/// The registry only ever holds [`ViewRef`]s. Hosts implement this trait so
/// [`Registry::check_views`](crate::registry::Registry::check_views) can
/// catch a misspelled view id at startup instead of on first navigation.
pub trait ViewResolver {
    fn can_resolve(&self, view: &ViewRef) -> bool;
}

/// Accepts every view. Useful when the host resolves lazily and has no
/// up-front list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ViewResolver for AcceptAll {
    fn can_resolve(&self, _view: &ViewRef) -> bool {
        true
    }
}

impl<F> ViewResolver for F
where
    F: Fn(&ViewRef) -> bool,
{
    fn can_resolve(&self, view: &ViewRef) -> bool {
        self(view)
    }
}
