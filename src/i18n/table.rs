//! Translation tables: one flat key → markup map per language.

use crate::surface::RenderSurface;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Key holding the copy button's default label.
pub const COPY_BUTTON_KEY: &str = "copyCodeButton";

/// Key holding the copy button's success label.
pub const COPY_SUCCESS_KEY: &str = "copyCodeSuccess";

/// Key holding the copy button's failure label.
pub const COPY_FAILED_KEY: &str = "copyCodeFailed";

/// A language's complete set of localized strings.
///
/// Values are HTML fragments and are inserted verbatim. Tables are replaced
/// wholesale on language change, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a locale resource body (a flat JSON object of strings).
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Look up a non-empty value.
    ///
    /// Empty strings count as missing so that a blank entry never wipes
    /// existing page text.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry into the elements tagged with its key.
    ///
    /// Keys without a tagged element are ignored; elements whose key is absent
    /// keep their current content. Applying the same table twice yields the
    /// same page as applying it once. Returns the number of elements updated.
    pub fn apply<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut updated = 0;
        for (key, markup) in &self.entries {
            if markup.is_empty() {
                continue;
            }
            let count = surface.set_tagged_content(key, markup);
            if count == 0 {
                debug!("No element tagged with translation key '{}'", key);
            }
            updated += count;
        }
        updated
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
