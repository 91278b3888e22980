//! Language session: picks the active language and keeps the page translated.
//!
//! The session owns the only mutable i18n state (active language and its
//! translation table) and replaces both as whole values on every switch.
//!
//! Startup walks `Uninitialized → Resolving → Active(code)`:
//! 1. a persisted `user-lang` preference that is still available wins,
//! 2. then the environment locale's primary subtag, if available,
//! 3. then the configured default, *without* checking availability.
//!
//! Step 3 mirrors the site's long-standing behavior of always landing on the
//! default language; it is logged when the default is not actually offered.

use crate::banner::{CopyLabels, COPY_BUTTON_ID, DEFAULT_TEXT_ATTR};
use crate::error::SiteError;
use crate::i18n::discovery::{resolve_availability, AvailabilitySet};
use crate::i18n::language::{primary_subtag, validate_code};
use crate::i18n::store::{PreferenceStore, LANGUAGE_PREFERENCE_KEY};
use crate::i18n::table::{COPY_BUTTON_KEY, COPY_FAILED_KEY, COPY_SUCCESS_KEY};
use crate::i18n::{LanguageDescriptor, LocaleSource, TranslationTable};
use crate::surface::{RenderSurface, LANG_ATTR, LANG_BUTTON_CLASS};
use tracing::{debug, info, warn};

/// Lifecycle of a language session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Resolving,
    Active(String),
}

/// Why a language was chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChoice {
    Persisted,
    Environment,
    Fallback,
}

/// Outcome of loading a translation table.
///
/// A missing table is not an error: the page simply keeps its current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLoad {
    /// Table loaded; number of page elements updated.
    Loaded { entries: usize, updated: usize },
    /// Table unavailable; an empty table is active.
    Missing { reason: String },
}

pub struct LanguageSession {
    source: Box<dyn LocaleSource>,
    store: Box<dyn PreferenceStore>,
    default_language: String,
    availability: AvailabilitySet,
    state: SessionState,
    translations: TranslationTable,
}

impl LanguageSession {
    pub fn new(
        source: Box<dyn LocaleSource>,
        store: Box<dyn PreferenceStore>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            default_language: default_language.into(),
            availability: AvailabilitySet::default(),
            state: SessionState::Uninitialized,
            translations: TranslationTable::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active language code, once the session has started.
    pub fn active_language(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(code) => Some(code),
            _ => None,
        }
    }

    pub fn availability(&self) -> &AvailabilitySet {
        &self.availability
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    /// Resolve availability, pick the initial language and activate it.
    ///
    /// Availability is computed here once and never refreshed by later
    /// `set_language` calls.
    pub async fn start<S>(
        &mut self,
        candidates: Vec<LanguageDescriptor>,
        discover: bool,
        environment_locale: &str,
        surface: &mut S,
    ) -> (LanguageChoice, TableLoad)
    where
        S: RenderSurface + ?Sized,
    {
        let (code, choice) = self
            .resolve_initial(candidates, discover, environment_locale)
            .await;
        let load = self.set_language(&code, surface).await;
        (choice, load)
    }

    /// First half of `start`: settle availability and pick the language,
    /// without touching the page.
    pub async fn resolve_initial(
        &mut self,
        candidates: Vec<LanguageDescriptor>,
        discover: bool,
        environment_locale: &str,
    ) -> (String, LanguageChoice) {
        self.state = SessionState::Resolving;
        self.availability = resolve_availability(self.source.as_ref(), candidates, discover).await;

        let (code, choice) = self.initial_language(environment_locale);
        info!("Initial language: {} ({:?})", code, choice);
        (code, choice)
    }

    /// Apply the startup fallback chain against the current availability set.
    pub fn initial_language(&self, environment_locale: &str) -> (String, LanguageChoice) {
        let persisted = match self.store.get(LANGUAGE_PREFERENCE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read language preference: {}", e);
                None
            }
        };

        if let Some(code) = persisted {
            if self.availability.contains(&code) {
                return (code, LanguageChoice::Persisted);
            }
            debug!("Persisted language '{}' is no longer available", code);
        }

        let env_code = primary_subtag(environment_locale);
        if self.availability.contains(&env_code) {
            return (env_code, LanguageChoice::Environment);
        }

        if !self.availability.contains(&self.default_language) {
            warn!(
                "Falling back to '{}' although it is not among the available languages [{}]",
                self.default_language,
                self.availability.codes().join(", ")
            );
        }
        (self.default_language.clone(), LanguageChoice::Fallback)
    }

    /// Activate `code`: load its table, translate the page, persist the choice.
    ///
    /// Never fails. A table that cannot be loaded becomes an empty table, so
    /// the page keeps whatever text it already shows. Codes that are not
    /// plain language tags are refused and leave the session untouched.
    pub async fn set_language<S>(&mut self, code: &str, surface: &mut S) -> TableLoad
    where
        S: RenderSurface + ?Sized,
    {
        let fetched = self.load_table(code).await;
        self.activate(code, fetched, surface)
    }

    /// Fetch the table for `code` without touching the page or the session.
    pub async fn load_table(&self, code: &str) -> Result<TranslationTable, SiteError> {
        validate_code(code)?;
        self.source.fetch(code).await
    }

    /// Make `code` active with an already fetched table (see `load_table`).
    pub fn activate<S>(
        &mut self,
        code: &str,
        fetched: Result<TranslationTable, SiteError>,
        surface: &mut S,
    ) -> TableLoad
    where
        S: RenderSurface + ?Sized,
    {
        if let Err(e) = validate_code(code) {
            warn!("Ignoring language switch: {}", e);
            return TableLoad::Missing {
                reason: e.to_string(),
            };
        }

        let (translations, missing) = match fetched {
            Ok(table) => (table, None),
            Err(e) => {
                warn!("Translations for '{}' unavailable, keeping page text: {}", code, e);
                (TranslationTable::new(), Some(e.to_string()))
            }
        };

        let updated = translations.apply(surface);
        if let Some(label) = translations.get(COPY_BUTTON_KEY) {
            surface.set_attribute(COPY_BUTTON_ID, DEFAULT_TEXT_ATTR, label);
        }
        surface.set_document_lang(code);
        for button in surface.elements_with_class(LANG_BUTTON_CLASS) {
            let is_active = surface.attribute(&button, LANG_ATTR).as_deref() == Some(code);
            surface.toggle_class(&button, "active", is_active);
        }

        if let Err(e) = self.store.set(LANGUAGE_PREFERENCE_KEY, code) {
            warn!("Could not persist language preference '{}': {}", code, e);
        }

        let entries = translations.len();
        self.translations = translations;
        self.state = SessionState::Active(code.to_string());

        match missing {
            None => {
                info!(
                    "✓ Language '{}' active ({} entries, {} elements updated)",
                    code, entries, updated
                );
                TableLoad::Loaded { entries, updated }
            }
            Some(reason) => TableLoad::Missing { reason },
        }
    }

    /// Labels for the copy button in the active language.
    pub fn copy_labels(&self) -> CopyLabels {
        let defaults = CopyLabels::default();
        let localized = |key: &str, fallback: String| {
            self.translations
                .get(key)
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        CopyLabels {
            default_label: localized(COPY_BUTTON_KEY, defaults.default_label),
            success_label: localized(COPY_SUCCESS_KEY, defaults.success_label),
            failure_label: localized(COPY_FAILED_KEY, defaults.failure_label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::store::MemoryStore;
    use crate::surface::MemorySurface;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory locale source: every listed code has a table.
    struct StaticSource {
        tables: HashMap<String, TranslationTable>,
    }

    impl StaticSource {
        fn new(tables: Vec<(&str, Vec<(&str, &str)>)>) -> Self {
            Self {
                tables: tables
                    .into_iter()
                    .map(|(code, entries)| (code.to_string(), entries.into_iter().collect()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl LocaleSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self, code: &str) -> Result<TranslationTable, SiteError> {
            self.tables
                .get(code)
                .cloned()
                .ok_or_else(|| SiteError::LocaleStatus {
                    code: code.to_string(),
                    status: 404,
                })
        }

        async fn probe(&self, code: &str) -> Result<(), SiteError> {
            self.fetch(code).await.map(|_| ())
        }
    }

    fn source() -> StaticSource {
        StaticSource::new(vec![
            (
                "tr",
                vec![("heroTitle", "Merhaba"), ("copyCodeButton", "Kodu Kopyala")],
            ),
            ("en", vec![("heroTitle", "Hello"), ("copyCodeSuccess", "Done!")]),
        ])
    }

    fn candidates() -> Vec<LanguageDescriptor> {
        vec![
            LanguageDescriptor::new("tr", "Türkçe"),
            LanguageDescriptor::new("en", "English"),
            LanguageDescriptor::new("de", "Deutsch"),
        ]
    }

    fn page() -> MemorySurface {
        MemorySurface::new()
            .with_tagged("title", "heroTitle", "…")
            .with_element(COPY_BUTTON_ID, "Copy")
            .with_language_button("btn-tr", "tr", "TR")
            .with_language_button("btn-en", "en", "EN")
    }

    fn session(store: MemoryStore) -> LanguageSession {
        LanguageSession::new(Box::new(source()), Box::new(store), "tr")
    }

    // ==================== Fallback chain ====================

    #[tokio::test]
    async fn test_persisted_language_wins() {
        let mut session = session(MemoryStore::new().with_value("user-lang", "en"));
        let mut surface = page();

        let (choice, _) = session.start(candidates(), true, "tr-TR", &mut surface).await;

        assert_eq!(choice, LanguageChoice::Persisted);
        assert_eq!(session.active_language(), Some("en"));
        assert_eq!(surface.inner_html("title").unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_environment_language_when_nothing_persisted() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();

        let (choice, _) = session.start(candidates(), true, "en-GB", &mut surface).await;

        assert_eq!(choice, LanguageChoice::Environment);
        assert_eq!(session.active_language(), Some("en"));
    }

    #[tokio::test]
    async fn test_unavailable_persisted_language_is_skipped() {
        // "de" is a candidate but has no locale file
        let mut session = session(MemoryStore::new().with_value("user-lang", "de"));
        let mut surface = page();

        let (choice, _) = session.start(candidates(), true, "en-US", &mut surface).await;

        assert_eq!(choice, LanguageChoice::Environment);
        assert_eq!(session.active_language(), Some("en"));
        assert!(!session.availability().contains("de"));
    }

    #[tokio::test]
    async fn test_default_selected_even_when_unavailable() {
        let mut session = LanguageSession::new(
            Box::new(StaticSource::new(vec![("en", vec![("heroTitle", "Hello")])])),
            Box::new(MemoryStore::new()),
            "tr",
        );
        let mut surface = page();

        let (choice, load) = session.start(candidates(), true, "fr-FR", &mut surface).await;

        assert_eq!(choice, LanguageChoice::Fallback);
        assert_eq!(session.active_language(), Some("tr"));
        assert!(matches!(load, TableLoad::Missing { .. }));
        // Empty table: existing text stays
        assert_eq!(surface.inner_html("title").unwrap(), "…");
    }

    // ==================== Activation ====================

    #[tokio::test]
    async fn test_set_language_updates_page_and_persists() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();
        session.start(candidates(), false, "tr", &mut surface).await;

        let load = session.set_language("en", &mut surface).await;

        assert_eq!(
            load,
            TableLoad::Loaded {
                entries: 2,
                updated: 1
            }
        );
        assert_eq!(surface.document_lang().as_deref(), Some("en"));
        assert!(surface.has_class("btn-en", "active"));
        assert!(!surface.has_class("btn-tr", "active"));
        assert_eq!(
            session.initial_language("tr-TR"),
            ("en".to_string(), LanguageChoice::Persisted)
        );
    }

    #[tokio::test]
    async fn test_missing_table_keeps_previous_text_and_still_persists() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();
        session.start(candidates(), false, "tr", &mut surface).await;
        assert_eq!(surface.inner_html("title").unwrap(), "Merhaba");

        let load = session.set_language("de", &mut surface).await;

        assert!(matches!(load, TableLoad::Missing { .. }));
        assert_eq!(surface.inner_html("title").unwrap(), "Merhaba");
        assert!(session.translations().is_empty());
        assert_eq!(session.active_language(), Some("de"));
    }

    #[tokio::test]
    async fn test_copy_button_default_text_follows_language() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();
        session.start(candidates(), false, "tr", &mut surface).await;

        assert_eq!(
            surface.attribute(COPY_BUTTON_ID, DEFAULT_TEXT_ATTR).as_deref(),
            Some("Kodu Kopyala")
        );
        let labels = session.copy_labels();
        assert_eq!(labels.default_label, "Kodu Kopyala");
        assert_eq!(labels.success_label, CopyLabels::default().success_label);
    }

    #[tokio::test]
    async fn test_switching_does_not_rerun_discovery() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();
        session.start(candidates(), true, "tr", &mut surface).await;
        let before = session.availability().clone();

        session.set_language("en", &mut surface).await;

        assert_eq!(session.availability(), &before);
    }

    #[tokio::test]
    async fn test_path_like_code_is_refused() {
        let store = MemoryStore::new();
        let mut session = session(store);
        let mut surface = page();
        session.start(candidates(), false, "tr", &mut surface).await;

        let load = session.set_language("../secret", &mut surface).await;

        assert!(matches!(load, TableLoad::Missing { .. }));
        assert_eq!(session.active_language(), Some("tr"));
        assert_eq!(surface.document_lang().as_deref(), Some("tr"));
        assert_eq!(surface.inner_html("title").unwrap(), "Merhaba");
        assert_eq!(
            session.initial_language("tr"),
            ("tr".to_string(), LanguageChoice::Persisted)
        );
    }

    #[tokio::test]
    async fn test_resolve_then_activate_matches_start() {
        let mut session = session(MemoryStore::new());
        let mut surface = page();

        let (code, choice) = session.resolve_initial(candidates(), true, "en-US").await;
        assert_eq!(session.state(), &SessionState::Resolving);
        assert_eq!((code.as_str(), choice), ("en", LanguageChoice::Environment));

        let fetched = session.load_table(&code).await;
        let load = session.activate(&code, fetched, &mut surface);

        assert!(matches!(load, TableLoad::Loaded { .. }));
        assert_eq!(session.active_language(), Some("en"));
        assert_eq!(surface.inner_html("title").unwrap(), "Hello");
    }

    #[test]
    fn test_new_session_is_uninitialized() {
        let session = session(MemoryStore::new());
        assert_eq!(session.state(), &SessionState::Uninitialized);
        assert_eq!(session.active_language(), None);
    }
}
