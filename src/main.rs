use anyhow::{Context, Result};
use landing_site::banner::FileClipboard;
use landing_site::config::Config;
use landing_site::i18n::{LanguageSession, LocaleSource};
use landing_site::site::{self, Site, PAGE_KEYS};
use landing_site::surface::RenderSurface;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("landing_site=info".parse()?),
        )
        .init();

    info!("Starting landing site");

    // Load configuration from environment
    let config = Config::from_env()?;

    let source = site::locale_source(&config).context("Failed to set up locale source")?;
    info!("Locale source: {}", source.describe());

    let session = LanguageSession::new(
        source,
        site::preference_store(&config),
        config.default_language.clone(),
    );
    let candidates = site::candidates(&config);
    let clipboard = Arc::new(FileClipboard::new(config.site_root.join("banner-snippet.html")));

    let mut landing = Site::new(
        site::standard_page(&candidates),
        session,
        clipboard,
        config.copy_reset,
    );

    // Step 1: Resolve languages and translate the page
    let (choice, load) = landing
        .boot(candidates, config.language_discovery, &config.browser_language)
        .await;
    info!("Language chosen via {:?}: {:?}", choice, load);

    let available = landing.session().availability().codes().join(", ");
    println!(
        "Active language: {} (available: {})",
        landing.session().active_language().unwrap_or("-"),
        if available.is_empty() { "none" } else { available.as_str() }
    );

    // Step 2: Show the translated page copy
    for key in PAGE_KEYS {
        let text = landing
            .surface()
            .inner_html(&format!("i18n-{}", key))
            .unwrap_or_default();
        if !text.is_empty() {
            println!("  {:<18} {}", key, text);
        }
    }

    // Step 3: Show the banner snippet visitors would copy
    println!("\n{}", landing_site::banner::export_snippet(&landing.preview_markup()));

    landing.teardown();
    Ok(())
}
