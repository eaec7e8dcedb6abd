//! Localized message dictionaries.
//!
//! Modules ship partial dictionaries in whichever placeholder syntax they
//! were written in. [`merge`] normalizes and layers them over the shell's
//! base dictionary; [`LocaleCatalog`] caches the result per locale and
//! answers translation lookups.

mod catalog;
pub mod error;
pub mod merge;

pub use catalog::{LocaleCatalog, SHIPPED_LOCALES};
pub use error::LocaleError;
pub use merge::{deep_merge, merge_locale, normalize_placeholders, normalize_text};
