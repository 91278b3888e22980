//! Page controller: ties the language session, banner generator and page
//! chrome to one rendering surface, the way the page script wires its event
//! listeners.
//!
//! The surface is shared with the copy button's reset task, which repaints
//! the button on its own when the acknowledgment delay runs out. The page
//! lock is never held across an `.await`.

use crate::banner::{
    render_preview, BannerConfig, BannerSize, ButtonPainter, Clipboard, CopyButton,
    SnippetExporter, COPY_BUTTON_ID, PREVIEW_ID,
};
use crate::config::Config;
use crate::error::SiteError;
use crate::i18n::table::COPY_BUTTON_KEY;
use crate::i18n::{
    DirLocaleSource, HttpLocaleSource, JsonFileStore, LanguageChoice, LanguageDescriptor,
    LanguageRegistry, LanguageSession, LocaleSource, PreferenceStore, TableLoad,
};
use crate::surface::{MemorySurface, RenderSurface};
use crate::ui::{
    HeaderScroll, NavDrawer, RevealTracker, BODY_ID, FADE_IN_CLASS, HEADER_ID, MOBILE_NAV_ID,
    OVERLAY_ID,
};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::info;

/// Translation key for the banner's text.
pub const BANNER_TEXT_KEY: &str = "bannerText";

/// Banner text shown before any translation is loaded.
const DEFAULT_BANNER_TEXT: &str = "Featured on Landing";

/// Copy button label shown before any translation is loaded.
const DEFAULT_COPY_LABEL: &str = "Copy Code";

/// Translation keys the standard page is tagged with.
pub const PAGE_KEYS: &[&str] = &[
    "navHome",
    "navFeatures",
    "navBanner",
    "heroTitle",
    "heroSubtitle",
    "heroCta",
    "featuresTitle",
    "bannerTitle",
    "bannerSizeLabel",
    "bannerColorLabel",
    "footerNote",
];

pub struct Site<S: RenderSurface + Send + 'static> {
    surface: Arc<Mutex<S>>,
    session: LanguageSession,
    exporter: SnippetExporter,
    banner: BannerConfig,
    drawer: NavDrawer,
    header: HeaderScroll,
    reveal: RevealTracker,
}

impl<S: RenderSurface + Send + 'static> Site<S> {
    pub fn new(
        surface: S,
        session: LanguageSession,
        clipboard: Arc<dyn Clipboard>,
        copy_reset: Duration,
    ) -> Self {
        let reveal = RevealTracker::observe_page(&surface);
        let surface = Arc::new(Mutex::new(surface));

        let page = Arc::clone(&surface);
        let painter: ButtonPainter =
            Arc::new(move |button: &CopyButton| button.render(&mut *lock_page(&page)));

        Self {
            surface,
            session,
            exporter: SnippetExporter::new(clipboard, copy_reset).with_painter(painter),
            banner: BannerConfig::default(),
            drawer: NavDrawer::new(),
            header: HeaderScroll::new(),
            reveal,
        }
    }

    /// The page, locked for the lifetime of the returned guard.
    ///
    /// Holding the guard blocks the copy button's delayed repaint.
    pub fn surface(&self) -> MutexGuard<'_, S> {
        lock_page(&self.surface)
    }

    pub fn session(&self) -> &LanguageSession {
        &self.session
    }

    pub fn banner(&self) -> &BannerConfig {
        &self.banner
    }

    /// Startup: resolve languages, activate one, draw the banner preview.
    pub async fn boot(
        &mut self,
        candidates: Vec<LanguageDescriptor>,
        discover: bool,
        environment_locale: &str,
    ) -> (LanguageChoice, TableLoad) {
        let (code, choice) = self
            .session
            .resolve_initial(candidates, discover, environment_locale)
            .await;
        let load = self.activate(&code).await;
        info!(
            "Site ready in '{}' with {} language(s) offered",
            self.session.active_language().unwrap_or("?"),
            self.session.availability().len()
        );
        (choice, load)
    }

    /// A language button was clicked.
    pub async fn switch_language(&mut self, code: &str) -> TableLoad {
        self.activate(code).await
    }

    /// The size selector or color input changed.
    pub fn update_banner(&mut self, size_selector: &str, color: &str) {
        self.banner = BannerConfig {
            size: BannerSize::from_selector(size_selector),
            color: color.to_string(),
        };
        self.refresh_banner();
    }

    /// Current preview markup (with element ids, as shown on the page).
    pub fn preview_markup(&self) -> String {
        let label = self
            .session
            .translations()
            .get(BANNER_TEXT_KEY)
            .unwrap_or(DEFAULT_BANNER_TEXT);
        render_preview(&self.banner, label)
    }

    /// The copy button was clicked.
    ///
    /// The button is painted immediately and again, without further calls,
    /// once the acknowledgment delay has passed.
    pub async fn copy_banner(&mut self) -> Result<String, SiteError> {
        let markup = self.preview_markup();
        self.exporter.copy(&markup, self.session.copy_labels()).await
    }

    /// Current copy button state, repainted onto the page.
    pub fn refresh_copy_button(&mut self) -> CopyButton {
        self.exporter.repaint()
    }

    pub fn toggle_nav(&mut self) {
        self.drawer.toggle(&mut *lock_page(&self.surface));
    }

    pub fn is_nav_open(&self) -> bool {
        self.drawer.is_open()
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.header.on_scroll(scroll_y, &mut *lock_page(&self.surface));
    }

    pub fn on_intersection(&mut self, id: &str, visible_ratio: f64) -> bool {
        self.reveal
            .on_intersection(id, visible_ratio, &mut *lock_page(&self.surface))
    }

    /// Drop any pending copy-button reset (page teardown).
    pub fn teardown(&mut self) {
        self.exporter.cancel_reset();
    }

    /// Fetch off-lock, then apply the table, copy labels and banner text.
    async fn activate(&mut self, code: &str) -> TableLoad {
        let fetched = self.session.load_table(code).await;
        let load = {
            let mut page = lock_page(&self.surface);
            self.session.activate(code, fetched, &mut *page)
        };
        self.exporter.relabel(self.session.copy_labels());
        self.refresh_banner();
        load
    }

    fn refresh_banner(&mut self) {
        let markup = self.preview_markup();
        lock_page(&self.surface).set_inner_html(PREVIEW_ID, &markup);
    }
}

fn lock_page<S>(page: &Mutex<S>) -> MutexGuard<'_, S> {
    page.lock().unwrap_or_else(|e| e.into_inner())
}

/// Locale source chosen by configuration: HTTP when a base URL is set,
/// otherwise the site root on disk.
pub fn locale_source(config: &Config) -> Result<Box<dyn LocaleSource>, SiteError> {
    match &config.locales_base_url {
        Some(url) => Ok(Box::new(HttpLocaleSource::new(url, config.probe_timeout)?)),
        None => Ok(Box::new(DirLocaleSource::new(&config.site_root))),
    }
}

/// Preference store chosen by configuration.
pub fn preference_store(config: &Config) -> Box<dyn PreferenceStore> {
    Box::new(JsonFileStore::new(&config.preference_file))
}

/// Candidate languages from configuration, labelled from the registry.
pub fn candidates(config: &Config) -> Vec<LanguageDescriptor> {
    LanguageRegistry::get().candidates(&config.supported_languages)
}

/// The landing page's element model: chrome, tagged copy, banner widget and
/// one button per candidate language.
pub fn standard_page(languages: &[LanguageDescriptor]) -> MemorySurface {
    let mut page = MemorySurface::new()
        .with_element(HEADER_ID, "")
        .with_element(MOBILE_NAV_ID, "")
        .with_element(OVERLAY_ID, "")
        .with_element(BODY_ID, "")
        .with_element(PREVIEW_ID, "")
        .with_tagged(COPY_BUTTON_ID, COPY_BUTTON_KEY, DEFAULT_COPY_LABEL);

    for key in PAGE_KEYS {
        page = page.with_tagged(&format!("i18n-{}", key), key, "");
    }
    for lang in languages {
        page = page.with_language_button(
            &format!("lang-{}", lang.code),
            &lang.code,
            &lang.display_name,
        );
    }
    for section in ["features", "banner", "faq"] {
        page = page.with_class(&format!("section-{}", section), FADE_IN_CLASS);
    }
    page
}
