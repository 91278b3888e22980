//! Snippet export: clean the preview markup and put it on the clipboard.
//!
//! After a copy the button shows an acknowledgment (or a failure notice) for
//! a fixed delay and then returns to its default label. The return is a
//! spawned task whose handle is kept, so a new copy or teardown cancels it.
//! Every state change, including the delayed return, goes through the
//! exporter's `ButtonPainter`, so the page never has to poll for it.

use crate::error::SiteError;
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Id of the copy button element.
pub const COPY_BUTTON_ID: &str = "copyCodeBtn";

/// Attribute holding the copy button's localized default label.
pub const DEFAULT_TEXT_ATTR: &str = "data-default-text";

/// Delay before the copy button returns to its default label.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

static ID_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Strip every `id="..."` attribute and trim surrounding whitespace.
///
/// The match is textual: `id="` up to the next `"`. Attributes that merely
/// end in `id` (such as `data-id="..."`) lose that suffix as well.
pub fn export_snippet(markup: &str) -> String {
    let regex = ID_ATTR_REGEX.get_or_init(|| Regex::new(r#"id="[^"]*""#).unwrap());
    regex.replace_all(markup, "").trim().to_string()
}

/// Where copied snippets go.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), SiteError>;
}

/// Clipboard held in memory; optionally rejects every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses writes, like a browser without permission.
    pub fn rejecting() -> Self {
        Self {
            contents: Mutex::new(None),
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SiteError> {
        if self.reject {
            return Err(SiteError::Clipboard("write permission denied".to_string()));
        }
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard that writes the snippet to a file (for headless use).
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SiteError> {
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| SiteError::Clipboard(format!("{}: {}", self.path.display(), e)))
    }
}

/// Localized labels for the copy button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyLabels {
    pub default_label: String,
    pub success_label: String,
    pub failure_label: String,
}

impl Default for CopyLabels {
    fn default() -> Self {
        Self {
            default_label: "Copy Code".to_string(),
            success_label: "✅ Copied!".to_string(),
            failure_label: "⚠️ Copy failed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Idle,
    Copied,
    Failed(String),
}

/// Copy button state as the page should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    pub status: CopyStatus,
    pub labels: CopyLabels,
}

impl CopyButton {
    pub fn label(&self) -> &str {
        match self.status {
            CopyStatus::Idle => &self.labels.default_label,
            CopyStatus::Copied => &self.labels.success_label,
            CopyStatus::Failed(_) => &self.labels.failure_label,
        }
    }

    /// Disabled only while acknowledging a successful copy.
    pub fn is_disabled(&self) -> bool {
        self.status == CopyStatus::Copied
    }

    /// Paint the button onto the page.
    pub fn render<S: crate::surface::RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_inner_html(COPY_BUTTON_ID, self.label());
        surface.set_disabled(COPY_BUTTON_ID, self.is_disabled());
        surface.toggle_class(
            COPY_BUTTON_ID,
            "copy-failed",
            matches!(self.status, CopyStatus::Failed(_)),
        );
    }
}

/// Draws the copy button onto the page. Called with the button state locked,
/// from the caller's task or from the reset task.
pub type ButtonPainter = Arc<dyn Fn(&CopyButton) + Send + Sync>;

pub struct SnippetExporter {
    clipboard: Arc<dyn Clipboard>,
    button: Arc<Mutex<CopyButton>>,
    painter: Option<ButtonPainter>,
    reset_delay: Duration,
    pending_reset: Option<JoinHandle<()>>,
}

impl SnippetExporter {
    pub fn new(clipboard: Arc<dyn Clipboard>, reset_delay: Duration) -> Self {
        Self {
            clipboard,
            button: Arc::new(Mutex::new(CopyButton {
                status: CopyStatus::Idle,
                labels: CopyLabels::default(),
            })),
            painter: None,
            reset_delay,
            pending_reset: None,
        }
    }

    /// Paint every button change through `painter`.
    pub fn with_painter(mut self, painter: ButtonPainter) -> Self {
        self.painter = Some(painter);
        self
    }

    /// Snapshot of the copy button.
    pub fn button(&self) -> CopyButton {
        lock(&self.button).clone()
    }

    /// Paint the current state again and return it.
    pub fn repaint(&self) -> CopyButton {
        let button = lock(&self.button);
        paint(self.painter.as_ref(), &button);
        button.clone()
    }

    /// Swap in labels for a new language, keeping the current status, and
    /// repaint (a retranslated page may have overwritten the button).
    pub fn relabel(&mut self, labels: CopyLabels) {
        let mut button = lock(&self.button);
        button.labels = labels;
        paint(self.painter.as_ref(), &button);
    }

    /// Export `markup`, write it to the clipboard and start the acknowledgment.
    ///
    /// Must be called within a tokio runtime. Returns the exported snippet, or
    /// the clipboard error after the button has switched to its failure state.
    pub async fn copy(&mut self, markup: &str, labels: CopyLabels) -> Result<String, SiteError> {
        let snippet = export_snippet(markup);
        self.cancel_reset();

        let result = self.clipboard.write_text(&snippet).await;
        let status = match &result {
            Ok(()) => {
                info!("✓ Copied banner snippet ({} bytes)", snippet.len());
                CopyStatus::Copied
            }
            Err(e) => {
                warn!("✗ Could not copy banner snippet: {}", e);
                CopyStatus::Failed(e.to_string())
            }
        };

        {
            let mut button = lock(&self.button);
            button.labels = labels;
            button.status = status;
            paint(self.painter.as_ref(), &button);
        }
        self.schedule_reset();

        result.map(|()| snippet)
    }

    /// Cancel a pending label reset, leaving the button as it is.
    pub fn cancel_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }

    fn schedule_reset(&mut self) {
        let button = Arc::clone(&self.button);
        let painter = self.painter.clone();
        let delay = self.reset_delay;
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut button = lock(&button);
            button.status = CopyStatus::Idle;
            paint(painter.as_ref(), &button);
            debug!("Copy button reset after {:?}", delay);
        }));
    }
}

impl Drop for SnippetExporter {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}

fn lock(button: &Mutex<CopyButton>) -> MutexGuard<'_, CopyButton> {
    button.lock().unwrap_or_else(|e| e.into_inner())
}

fn paint(painter: Option<&ButtonPainter>, button: &CopyButton) {
    if let Some(painter) = painter {
        painter(button);
    }
}
