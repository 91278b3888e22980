//! Locale sources: where `locales/<code>.json` documents come from.

use crate::error::SiteError;
use crate::i18n::language::{locale_resource_path, validate_code};
use crate::i18n::TranslationTable;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// A place locale resources can be fetched from.
#[async_trait]
pub trait LocaleSource: Send + Sync {
    /// Human-readable source description for logs.
    fn describe(&self) -> String;

    /// Fetch and decode the translation table for `code`.
    async fn fetch(&self, code: &str) -> Result<TranslationTable, SiteError>;

    /// Check that `code`'s resource is reachable.
    ///
    /// Only reachability counts here; the body is not decoded.
    async fn probe(&self, code: &str) -> Result<(), SiteError>;
}

/// Locale resources served over HTTP, relative to a base URL.
pub struct HttpLocaleSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLocaleSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SiteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, locale_resource_path(code))
    }

    async fn get(&self, code: &str) -> Result<reqwest::Response, SiteError> {
        validate_code(code)?;
        let response = self
            .client
            .get(self.url_for(code))
            .send()
            .await
            .map_err(|e| SiteError::LocaleFetch {
                code: code.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::LocaleStatus {
                code: code.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl LocaleSource for HttpLocaleSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, code: &str) -> Result<TranslationTable, SiteError> {
        let body = self
            .get(code)
            .await?
            .text()
            .await
            .map_err(|e| SiteError::LocaleFetch {
                code: code.to_string(),
                reason: e.to_string(),
            })?;

        TranslationTable::from_json(&body).map_err(|e| SiteError::LocaleDecode {
            code: code.to_string(),
            reason: e.to_string(),
        })
    }

    async fn probe(&self, code: &str) -> Result<(), SiteError> {
        self.get(code).await.map(|_| ())
    }
}

/// Locale resources stored on disk under a site root.
pub struct DirLocaleSource {
    root: PathBuf,
}

impl DirLocaleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, code: &str) -> Result<PathBuf, SiteError> {
        validate_code(code)?;
        Ok(self.root.join(locale_resource_path(code)))
    }
}

#[async_trait]
impl LocaleSource for DirLocaleSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, code: &str) -> Result<TranslationTable, SiteError> {
        let path = self.path_for(code)?;
        let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SiteError::LocaleStatus {
                    code: code.to_string(),
                    status: 404,
                }
            } else {
                SiteError::LocaleFetch {
                    code: code.to_string(),
                    reason: format!("{}: {}", path.display(), e),
                }
            }
        })?;

        TranslationTable::from_json(&body).map_err(|e| SiteError::LocaleDecode {
            code: code.to_string(),
            reason: e.to_string(),
        })
    }

    async fn probe(&self, code: &str) -> Result<(), SiteError> {
        match tokio::fs::metadata(self.path_for(code)?).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(SiteError::LocaleStatus {
                code: code.to_string(),
                status: 404,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SiteError::LocaleStatus {
                code: code.to_string(),
                status: 404,
            }),
            Err(e) => Err(SiteError::LocaleFetch {
                code: code.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn write_locale(dir: &TempDir, code: &str, body: &str) {
        let locales = dir.path().join("locales");
        std::fs::create_dir_all(&locales).expect("create locales dir");
        std::fs::write(locales.join(format!("{}.json", code)), body).expect("write locale");
    }

    // ==================== HttpLocaleSource ====================

    #[tokio::test]
    async fn test_http_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locales/en.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"heroTitle": "Hello"}"#),
            )
            .mount(&mock_server)
            .await;

        let source =
            HttpLocaleSource::new(&mock_server.uri(), Duration::from_secs(5)).expect("client");
        let table = source.fetch("en").await.expect("fetch should succeed");

        assert_eq!(table.get("heroTitle"), Some("Hello"));
    }

    #[tokio::test]
    async fn test_http_fetch_404_is_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locales/de.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let source =
            HttpLocaleSource::new(&mock_server.uri(), Duration::from_secs(5)).expect("client");
        let err = source.fetch("de").await.unwrap_err();

        assert!(err.is_missing_locale());
    }

    #[tokio::test]
    async fn test_http_fetch_invalid_json_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locales/en.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let source =
            HttpLocaleSource::new(&mock_server.uri(), Duration::from_secs(5)).expect("client");
        let err = source.fetch("en").await.unwrap_err();

        assert!(matches!(err, SiteError::LocaleDecode { .. }));
    }

    #[tokio::test]
    async fn test_http_probe_only_checks_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locales/tr.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let source =
            HttpLocaleSource::new(&mock_server.uri(), Duration::from_secs(5)).expect("client");
        assert!(source.probe("tr").await.is_ok());
    }

    #[tokio::test]
    async fn test_http_rejects_path_like_code_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let source =
            HttpLocaleSource::new(&mock_server.uri(), Duration::from_secs(5)).expect("client");

        assert!(matches!(
            source.fetch("../secret").await,
            Err(SiteError::InvalidLanguageCode(_))
        ));
        assert!(source.probe("en/../x").await.is_err());
    }

    #[test]
    fn test_http_url_strips_trailing_slash() {
        let source = HttpLocaleSource::with_client(reqwest::Client::new(), "https://site.test/");
        assert_eq!(source.url_for("tr"), "https://site.test/locales/tr.json");
    }

    // ==================== DirLocaleSource ====================

    #[tokio::test]
    async fn test_dir_fetch_and_probe() {
        let dir = TempDir::new().expect("temp dir");
        write_locale(&dir, "tr", r#"{"heroTitle": "Merhaba"}"#);

        let source = DirLocaleSource::new(dir.path());

        assert!(source.probe("tr").await.is_ok());
        let table = source.fetch("tr").await.expect("fetch");
        assert_eq!(table.get("heroTitle"), Some("Merhaba"));
    }

    #[tokio::test]
    async fn test_dir_missing_file_is_missing_locale() {
        let dir = TempDir::new().expect("temp dir");
        let source = DirLocaleSource::new(dir.path());

        assert!(source.probe("en").await.unwrap_err().is_missing_locale());
        assert!(source.fetch("en").await.unwrap_err().is_missing_locale());
    }

    #[tokio::test]
    async fn test_dir_refuses_to_read_outside_locales() {
        let dir = TempDir::new().expect("temp dir");
        // A valid table one level above locales/
        std::fs::write(dir.path().join("secret.json"), r#"{"token": "hunter2"}"#)
            .expect("write secret");
        write_locale(&dir, "tr", "{}");

        let source = DirLocaleSource::new(dir.path());

        let err = source.fetch("../secret").await.unwrap_err();
        assert!(matches!(err, SiteError::InvalidLanguageCode(_)));
        assert!(matches!(
            source.probe("../secret").await,
            Err(SiteError::InvalidLanguageCode(_))
        ));
    }
}
