//! Language descriptors and locale-tag helpers.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};

/// A selectable language: short code plus the label shown on its button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    /// Short language code (e.g., "tr", "en"); also the locale file stem
    pub code: String,

    /// Human-readable label (e.g., "Türkçe", "English")
    pub display_name: String,
}

impl LanguageDescriptor {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }

    /// Relative location of this language's locale resource.
    pub fn resource_path(&self) -> String {
        locale_resource_path(&self.code)
    }
}

/// `locales/<code>.json`
pub fn locale_resource_path(code: &str) -> String {
    format!("locales/{}.json", code)
}

/// Whether `code` is safe to use as a locale file stem: ASCII letters,
/// digits and `-`, nothing else.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Reject codes that could escape `locales/` once joined into a path or URL.
pub fn validate_code(code: &str) -> Result<(), SiteError> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(SiteError::InvalidLanguageCode(code.to_string()))
    }
}

/// Extract the primary language subtag from an environment locale.
///
/// Handles browser tags (`en-US`) as well as POSIX locales (`en_US.UTF-8`).
/// Returns an empty string for empty input.
pub fn primary_subtag(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
