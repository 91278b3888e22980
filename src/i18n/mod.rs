//! Internationalization (i18n): language availability, selection and
//! page translation.
//!
//! # Architecture
//!
//! - `registry`: catalog of known languages and their labels
//! - `language`: `LanguageDescriptor` and locale-tag helpers
//! - `table`: flat key → markup translation tables
//! - `source`: where `locales/<code>.json` resources come from (HTTP or disk)
//! - `discovery`: which candidate languages actually have a resource
//! - `store`: the persisted `user-lang` preference
//! - `session`: startup fallback chain and language switching
//!
//! # Example
//!
//! ```rust,ignore
//! use landing_site::i18n::{DirLocaleSource, LanguageRegistry, LanguageSession, MemoryStore};
//!
//! let mut session = LanguageSession::new(
//!     Box::new(DirLocaleSource::new("site")),
//!     Box::new(MemoryStore::new()),
//!     "tr",
//! );
//! let candidates = LanguageRegistry::get().candidates(&["tr", "en"]);
//! session.start(candidates, true, "en-US", &mut page).await;
//! ```

pub mod discovery;
pub mod language;
mod registry;
pub mod session;
pub mod source;
pub mod store;
pub mod table;

pub use discovery::{discover_available, resolve_availability, AvailabilitySet};
pub use language::{primary_subtag, LanguageDescriptor};
pub use registry::LanguageRegistry;
pub use session::{LanguageChoice, LanguageSession, SessionState, TableLoad};
pub use source::{DirLocaleSource, HttpLocaleSource, LocaleSource};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, LANGUAGE_PREFERENCE_KEY};
pub use table::TranslationTable;
