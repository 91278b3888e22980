//! Language registry: the catalog of languages the site knows how to label.
//!
//! The registry is a lazily-initialized singleton (`OnceLock`). It does not
//! say which languages are *available*; that is decided per session either by
//! a fixed list or by probing locale files (see `discovery`).

use crate::i18n::LanguageDescriptor;
use std::sync::OnceLock;

/// Global catalog of known language labels.
pub struct LanguageRegistry {
    languages: Vec<LanguageDescriptor>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language descriptor by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All known languages, in catalog order.
    pub fn list_all(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    /// Build the ordered candidate list for the given codes.
    ///
    /// Codes missing from the catalog are still returned, labelled with the
    /// upper-cased code, so a site can ship a locale file before a label exists.
    pub fn candidates<S: AsRef<str>>(&self, codes: &[S]) -> Vec<LanguageDescriptor> {
        codes
            .iter()
            .map(|code| {
                let code = code.as_ref();
                self.get_by_code(code)
                    .cloned()
                    .unwrap_or_else(|| LanguageDescriptor::new(code, code.to_uppercase()))
            })
            .collect()
    }
}

/// Languages shipped with the site: Turkish (default) and English.
fn default_languages() -> Vec<LanguageDescriptor> {
    vec![
        LanguageDescriptor::new("tr", "Türkçe"),
        LanguageDescriptor::new("en", "English"),
    ]
}
