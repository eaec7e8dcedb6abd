//! Registry composition errors.
//!
//! Every variant describes a programming mistake in the compiled-in module
//! list. They surface once, at startup, and name the module and path
//! involved so the offending descriptor is easy to find.

use thiserror::Error;

/// Errors that abort registry composition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two descriptors share an id.
    #[error("module '{module}' is registered more than once")]
    DuplicateModule { module: String },

    /// Two routes resolve to the same full path.
    #[error("route '{path}' is declared by both '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// An authenticated route of a toggleable module has no owning module id
    /// anywhere in its route chain, so it could never be gated.
    #[error(
        "module '{module}': route '{path}' requires auth but carries no module id. Add `.module(ModuleId::...)` to the route or one of its parents"
    )]
    UngatedRoute { module: String, path: String },

    /// A view referenced by the registry cannot be resolved by the host.
    #[error("module '{module}': view '{view}' could not be resolved")]
    UnresolvedView { module: String, view: String },
}

impl RegistryError {
    /// Create a duplicate module error.
    pub fn duplicate_module(module: impl Into<String>) -> Self {
        Self::DuplicateModule {
            module: module.into(),
        }
    }

    /// Create a duplicate path error.
    pub fn duplicate_path(
        path: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicatePath {
            path: path.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}
