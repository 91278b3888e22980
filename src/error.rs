use thiserror::Error;

/// Errors produced by the site logic.
///
/// None of these are fatal to the page: locale errors are absorbed by the
/// session (empty table, language not offered) and clipboard errors become a
/// visible button state.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Locale resource could not be reached at all.
    #[error("failed to fetch locale '{code}': {reason}")]
    LocaleFetch { code: String, reason: String },

    /// Locale resource answered with a non-success status.
    #[error("locale '{code}' returned HTTP {status}")]
    LocaleStatus { code: String, status: u16 },

    /// Locale resource was reachable but not a flat string map.
    #[error("locale '{code}' is not a valid translation table: {reason}")]
    LocaleDecode { code: String, reason: String },

    /// Language code is not a plain `[A-Za-z0-9-]+` tag.
    #[error("invalid language code '{0}'")]
    InvalidLanguageCode(String),

    /// Clipboard write was rejected.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Preference store could not be read or written.
    #[error("preference store error: {0}")]
    Store(String),

    /// HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SiteError {
    /// Whether this error means the locale simply is not there
    /// (as opposed to a transport failure).
    pub fn is_missing_locale(&self) -> bool {
        matches!(self, SiteError::LocaleStatus { status: 404, .. })
    }
}
