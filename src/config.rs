use crate::i18n::language::is_valid_code;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    // Locale resources
    pub site_root: PathBuf,
    pub locales_base_url: Option<String>,
    pub probe_timeout: Duration,

    // Language selection
    pub language_discovery: bool,
    pub supported_languages: Vec<String>,
    pub default_language: String,
    pub browser_language: String,

    // Persistence
    pub preference_file: PathBuf,

    // Banner generator
    pub copy_reset: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_languages = parse_language_list(
            &std::env::var("SUPPORTED_LANGUAGES").unwrap_or_else(|_| "tr,en".to_string()),
        );
        if supported_languages.is_empty() {
            bail!("SUPPORTED_LANGUAGES must name at least one language code");
        }
        if let Some(code) = supported_languages.iter().find(|c| !is_valid_code(c)) {
            bail!("SUPPORTED_LANGUAGES contains an invalid code: '{}'", code);
        }

        let default_language =
            std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "tr".to_string());
        if !is_valid_code(&default_language) {
            bail!("DEFAULT_LANGUAGE is not a valid language code: '{}'", default_language);
        }

        Ok(Self {
            // Locale resources
            site_root: std::env::var("SITE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            locales_base_url: std::env::var("LOCALES_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            probe_timeout: Duration::from_secs(
                std::env::var("PROBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            ),

            // Language selection
            language_discovery: std::env::var("LANGUAGE_DISCOVERY")
                .ok()
                .and_then(|v| {
                    let parsed = parse_bool(&v);
                    if parsed.is_none() {
                        warn!("Ignoring LANGUAGE_DISCOVERY={:?}, keeping discovery on", v);
                    }
                    parsed
                })
                .unwrap_or(true),
            supported_languages,
            default_language,
            browser_language: std::env::var("BROWSER_LANGUAGE")
                .or_else(|_| std::env::var("LANG"))
                .unwrap_or_else(|_| "en-US".to_string()),

            // Persistence
            preference_file: std::env::var("PREFERENCE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".landing-site/preferences.json")),

            // Banner generator
            copy_reset: Duration::from_millis(
                std::env::var("COPY_RESET_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
        })
    }
}

/// Split a comma-separated list of language codes, dropping blanks and duplicates.
fn parse_language_list(raw: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in raw.split(',').map(|s| s.trim().to_lowercase()) {
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
