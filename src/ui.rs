//! Page chrome: mobile navigation drawer, header scroll state and
//! scroll-reveal animations. Each is a small state holder that writes
//! classes onto the `RenderSurface`.

use crate::surface::RenderSurface;
use std::collections::BTreeSet;

pub const MOBILE_NAV_ID: &str = "mobile-nav";
pub const OVERLAY_ID: &str = "overlay";
pub const BODY_ID: &str = "body";
pub const HEADER_ID: &str = "pageHeader";

/// Class marking elements that fade in when scrolled into view.
pub const FADE_IN_CLASS: &str = "fade-in-up";

/// Scroll offset (px) past which the header is styled as scrolled.
const HEADER_SCROLL_THRESHOLD: f64 = 10.0;

/// Visible fraction at which an element is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Mobile navigation drawer.
///
/// The burger button, close button, overlay and every drawer link all call
/// `toggle`.
#[derive(Debug, Clone, Default)]
pub struct NavDrawer {
    open: bool,
}

impl NavDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.open = !self.open;
        surface.toggle_class(MOBILE_NAV_ID, "open", self.open);
        surface.toggle_class(OVERLAY_ID, "visible", self.open);
        surface.toggle_class(BODY_ID, "no-scroll", self.open);
    }
}

/// Header that changes style once the page is scrolled.
#[derive(Debug, Clone, Default)]
pub struct HeaderScroll {
    scrolled: bool,
}

impl HeaderScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn on_scroll<S: RenderSurface + ?Sized>(&mut self, scroll_y: f64, surface: &mut S) {
        self.scrolled = scroll_y > HEADER_SCROLL_THRESHOLD;
        surface.toggle_class(HEADER_ID, "scrolled", self.scrolled);
    }
}

/// Reveal-once tracker for fade-in elements.
///
/// Elements are observed until they first become sufficiently visible, then
/// receive `visible` and are no longer observed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    observed: BTreeSet<String>,
}

impl RevealTracker {
    /// Observe every element carrying the fade-in class.
    pub fn observe_page<S: RenderSurface + ?Sized>(surface: &S) -> Self {
        Self {
            observed: surface
                .elements_with_class(FADE_IN_CLASS)
                .into_iter()
                .collect(),
        }
    }

    pub fn observe(&mut self, id: &str) {
        self.observed.insert(id.to_string());
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Handle an intersection report for `id`. Returns whether it was revealed.
    pub fn on_intersection<S: RenderSurface + ?Sized>(
        &mut self,
        id: &str,
        visible_ratio: f64,
        surface: &mut S,
    ) -> bool {
        if visible_ratio < REVEAL_THRESHOLD || !self.observed.remove(id) {
            return false;
        }
        surface.toggle_class(id, "visible", true);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn chrome() -> MemorySurface {
        MemorySurface::new()
            .with_element(MOBILE_NAV_ID, "")
            .with_element(OVERLAY_ID, "")
            .with_element(BODY_ID, "")
            .with_element(HEADER_ID, "")
            .with_class("features", FADE_IN_CLASS)
            .with_class("pricing", FADE_IN_CLASS)
    }

    // ==================== NavDrawer ====================

    #[test]
    fn test_drawer_toggle_opens_and_closes() {
        let mut surface = chrome();
        let mut drawer = NavDrawer::new();

        drawer.toggle(&mut surface);
        assert!(drawer.is_open());
        assert!(surface.has_class(MOBILE_NAV_ID, "open"));
        assert!(surface.has_class(OVERLAY_ID, "visible"));
        assert!(surface.has_class(BODY_ID, "no-scroll"));

        drawer.toggle(&mut surface);
        assert!(!drawer.is_open());
        assert!(!surface.has_class(MOBILE_NAV_ID, "open"));
        assert!(!surface.has_class(OVERLAY_ID, "visible"));
        assert!(!surface.has_class(BODY_ID, "no-scroll"));
    }

    // ==================== HeaderScroll ====================

    #[test]
    fn test_header_scrolled_past_threshold() {
        let mut surface = chrome();
        let mut header = HeaderScroll::new();

        header.on_scroll(10.0, &mut surface);
        assert!(!surface.has_class(HEADER_ID, "scrolled"));

        header.on_scroll(10.5, &mut surface);
        assert!(header.is_scrolled());
        assert!(surface.has_class(HEADER_ID, "scrolled"));

        header.on_scroll(0.0, &mut surface);
        assert!(!surface.has_class(HEADER_ID, "scrolled"));
    }

    // ==================== RevealTracker ====================

    #[test]
    fn test_reveal_tracker_observes_fade_in_elements() {
        let tracker = RevealTracker::observe_page(&chrome());
        assert_eq!(tracker.pending(), 2);
        assert!(tracker.is_observed("features"));
    }

    #[test]
    fn test_reveal_below_threshold_does_nothing() {
        let mut surface = chrome();
        let mut tracker = RevealTracker::observe_page(&surface);

        assert!(!tracker.on_intersection("features", 0.05, &mut surface));
        assert!(!surface.has_class("features", "visible"));
        assert!(tracker.is_observed("features"));
    }

    #[test]
    fn test_reveal_happens_once() {
        let mut surface = chrome();
        let mut tracker = RevealTracker::observe_page(&surface);

        assert!(tracker.on_intersection("features", 0.1, &mut surface));
        assert!(surface.has_class("features", "visible"));
        assert!(!tracker.is_observed("features"));

        // Scrolling away and back does not re-trigger
        surface.toggle_class("features", "visible", false);
        assert!(!tracker.on_intersection("features", 1.0, &mut surface));
        assert!(!surface.has_class("features", "visible"));
        assert_eq!(tracker.pending(), 1);
    }
}
