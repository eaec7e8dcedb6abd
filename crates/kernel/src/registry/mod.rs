//! Module registry.
//!
//! Composition of the compiled-in module descriptors into one immutable
//! [`Registry`], plus the flattened route index used to resolve requested
//! paths into guard targets.

mod composer;
pub mod error;
pub mod routes;
pub mod settings;

pub use composer::{MessageContribution, NavChildEntry, NavEntry, Registry, compose};
pub use error::RegistryError;
pub use routes::{
    DASHBOARD_PATH, LOGIN_PATH, NavigationTarget, REGISTER_PATH, RouteMatcher, SPLASH_PATH, shell_routes,
};
pub use settings::{SETTINGS_PATH, built_in_pages};
