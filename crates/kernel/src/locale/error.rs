//! Locale loading errors.

use thiserror::Error;

/// Errors raised while loading shipped dictionaries.
///
/// Merging itself never fails; these only surface at startup.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A dictionary is not valid JSON.
    #[error("locale '{locale}': failed to parse {source_name} dictionary: {details}")]
    Parse {
        locale: String,
        source_name: String,
        details: String,
    },

    /// A dictionary parsed, but its top level is not an object.
    #[error("locale '{locale}': {source_name} dictionary must be a JSON object")]
    NotAnObject { locale: String, source_name: String },
}

impl LocaleError {
    pub fn parse(locale: &str, source_name: &str, err: &serde_json::Error) -> Self {
        Self::Parse {
            locale: locale.to_string(),
            source_name: source_name.to_string(),
            details: err.to_string(),
        }
    }

    pub fn not_an_object(locale: &str, source_name: &str) -> Self {
        Self::NotAnObject {
            locale: locale.to_string(),
            source_name: source_name.to_string(),
        }
    }
}
