//! Rendering surface seam.
//!
//! The page itself (a browser DOM, a native webview, a test double) is an
//! external collaborator. Everything the site logic needs from it goes through
//! `RenderSurface`: tagged content replacement, classes, attributes and the
//! document language.

use std::collections::{BTreeMap, BTreeSet};

/// Attribute carrying the translation lookup key.
pub const I18N_KEY_ATTR: &str = "data-i18n-key";

/// Attribute carrying a language button's code.
pub const LANG_ATTR: &str = "data-lang";

/// Class shared by all language buttons.
pub const LANG_BUTTON_CLASS: &str = "lang-btn";

pub trait RenderSurface {
    /// Replace the content of every element tagged with `key`.
    /// Returns the number of elements updated.
    fn set_tagged_content(&mut self, key: &str, markup: &str) -> usize;

    fn set_inner_html(&mut self, id: &str, markup: &str);
    fn inner_html(&self, id: &str) -> Option<String>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str);
    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    /// Add `class` when `on`, remove it otherwise.
    fn toggle_class(&mut self, id: &str, class: &str, on: bool);
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_disabled(&mut self, id: &str, disabled: bool);
    fn is_disabled(&self, id: &str) -> bool;

    /// Ids of all elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<String>;

    fn set_document_lang(&mut self, code: &str);
    fn document_lang(&self) -> Option<String>;
}

/// One element of the in-memory page model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub inner_html: String,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub disabled: bool,
}

/// In-memory page model used by the CLI and tests.
///
/// Elements are addressed by id and kept in insertion order so that
/// `elements_with_class` matches document order.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    order: Vec<String>,
    elements: BTreeMap<String, Element>,
    document_lang: Option<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an element with initial content.
    pub fn with_element(mut self, id: &str, inner_html: &str) -> Self {
        self.insert(id, inner_html);
        self
    }

    /// Insert an element tagged with a translation key.
    pub fn with_tagged(mut self, id: &str, key: &str, inner_html: &str) -> Self {
        self.insert(id, inner_html);
        self.set_attribute(id, I18N_KEY_ATTR, key);
        self
    }

    /// Insert a language button for `code`.
    pub fn with_language_button(mut self, id: &str, code: &str, label: &str) -> Self {
        self.insert(id, label);
        self.set_attribute(id, LANG_ATTR, code);
        self.toggle_class(id, LANG_BUTTON_CLASS, true);
        self
    }

    /// Insert an element carrying `class`.
    pub fn with_class(mut self, id: &str, class: &str) -> Self {
        self.insert(id, "");
        self.toggle_class(id, class, true);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    fn insert(&mut self, id: &str, inner_html: &str) {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.elements.insert(
            id.to_string(),
            Element {
                inner_html: inner_html.to_string(),
                ..Element::default()
            },
        );
    }

    /// Mutable access; operations on unknown ids are silently ignored,
    /// the way a page script's lookups on missing elements are.
    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}

impl RenderSurface for MemorySurface {
    fn set_tagged_content(&mut self, key: &str, markup: &str) -> usize {
        let mut updated = 0;
        for element in self.elements.values_mut() {
            if element.attributes.get(I18N_KEY_ATTR).map(String::as_str) == Some(key) {
                element.inner_html = markup.to_string();
                updated += 1;
            }
        }
        updated
    }

    fn set_inner_html(&mut self, id: &str, markup: &str) {
        if let Some(element) = self.element_mut(id) {
            element.inner_html = markup.to_string();
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.inner_html.clone())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements
            .get(id)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(element) = self.element_mut(id) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(element) = self.element_mut(id) {
            element.disabled = disabled;
        }
    }

    fn is_disabled(&self, id: &str) -> bool {
        self.elements.get(id).map(|e| e.disabled).unwrap_or(false)
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| self.has_class(id, class))
            .cloned()
            .collect()
    }

    fn set_document_lang(&mut self, code: &str) {
        self.document_lang = Some(code.to_string());
    }

    fn document_lang(&self) -> Option<String> {
        self.document_lang.clone()
    }
}
