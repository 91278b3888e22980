//! Banner generator: a live preview of a "featured on" banner that visitors
//! can restyle and copy into their own pages.
//!
//! - `contrast`: readable text color for the chosen background
//! - `style`: size presets and the resolved inline style
//! - `export`: id-free snippet export, clipboard write and copy-button state

pub mod contrast;
pub mod export;
pub mod style;

pub use contrast::text_color_for;
pub use export::{
    export_snippet, ButtonPainter, Clipboard, CopyButton, CopyLabels, CopyStatus, FileClipboard,
    MemoryClipboard, SnippetExporter, COPY_BUTTON_ID, DEFAULT_RESET_DELAY, DEFAULT_TEXT_ATTR,
};
pub use style::{BannerConfig, BannerSize, BannerStyle, SizeMetrics};

/// Id of the preview container.
pub const PREVIEW_ID: &str = "bannerPreview";

/// Material icon shown at the start of the banner.
const BANNER_ICON: &str = "verified";

/// Render the preview element for `config` with `label` as its (markup) text.
///
/// The output carries element ids, as the live page does; `export_snippet`
/// removes them before anything is copied.
pub fn render_preview(config: &BannerConfig, label: &str) -> String {
    let style = BannerStyle::resolve(config);
    format!(
        r#"<div id="{}" class="banner-preview" style="{}"><span class="material-icons-outlined" style="{}">{}</span><span id="bannerText">{}</span></div>"#,
        PREVIEW_ID,
        style.container_css(),
        style.icon_css(),
        BANNER_ICON,
        label
    )
}
