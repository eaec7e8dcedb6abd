//! Tally Module SDK
//!
//! Types and builders for Tally feature modules. A module describes the
//! navigation entry, routes, settings pages and localized text it contributes
//! to the application shell; the kernel composes every module's descriptor
//! into one registry at startup.
//!
//! Modules depend only on this crate.

pub mod messages;
pub mod route;
pub mod types;

pub mod prelude {
    pub use crate::messages::*;
    pub use crate::route::*;
    pub use crate::types::*;
}
