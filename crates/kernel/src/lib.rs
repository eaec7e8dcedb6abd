//! Tally shell kernel.
//!
//! Composes the compiled-in feature modules into one immutable
//! [`Registry`](registry::Registry), authorizes every navigation against the
//! session and the user's module preferences, and merges each module's
//! localized messages into per-locale dictionaries.
//!
//! Hosts start with [`Shell::init`].

pub mod config;
pub mod guard;
pub mod locale;
pub mod modules;
pub mod navigator;
pub mod overrides;
pub mod registry;
pub mod session;
pub mod shell;
pub mod storage;
pub mod telemetry;
pub mod view;

pub use config::Config;
pub use guard::{Effect, GuardDecision, Outcome, authorize, logout_effects};
pub use locale::{LocaleCatalog, LocaleError};
pub use navigator::{Navigation, Navigator};
pub use overrides::{
    ModuleOverrides, UnknownModulePolicy, is_module_enabled, normalize_module_overrides,
    normalize_module_overrides_value,
};
pub use registry::{NavigationTarget, Registry, RegistryError, compose};
pub use session::{SessionSignals, SessionState};
pub use shell::Shell;
pub use storage::{KeyValueStore, MemoryStore};
pub use view::ViewResolver;
