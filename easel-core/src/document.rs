//! The page-indexed document model.
//!
//! A [`Document`] is the single source of truth shared by the editing
//! surface and every exporter: an ordered list of pages, each holding an
//! ordered list of [`Element`]s, plus document-level metadata. Pages are
//! contiguous by construction (index = position); pages are only ever
//! appended at the end or removed from the end, and element lists are only
//! mutated by append, remove-by-id, and patch-by-id.
//!
//! Exporters take `&Document` and never mutate it; callers that keep a
//! live, continuously edited model hand each export its own cloned
//! snapshot.

use serde::{Deserialize, Serialize};

use crate::content::DocumentContent;
use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{CoreError, CoreResult};
use crate::units::PageSize;

/// One canvas page: an ordered sequence of elements.
///
/// Paint order is insertion order, except that every exporter renders all
/// text elements after all non-text elements (the text-on-top rule). That
/// reordering happens at render time only; the stored order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    /// The elements in stored (insertion) order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A complete document: pages, title, and optional structured content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title.
    pub title: String,
    /// Ordered pages; the index of a page is its position.
    pages: Vec<Page>,
    /// Structured content from the generation collaborator, if any.
    #[serde(default)]
    pub content: Option<DocumentContent>,
    /// Canvas page size shared by all pages.
    #[serde(default)]
    pub page_size: PageSize,
}

impl Document {
    /// Create an empty document with a single blank page.
    #[must_use]
    pub fn new(title: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            title: title.into(),
            pages: vec![Page::default()],
            content: None,
            page_size,
        }
    }

    /// Create a document seeded from a structured content object.
    ///
    /// Page 0 receives the deterministic initial layout produced by
    /// [`crate::seed::seed_elements`]; the content object is retained as
    /// document metadata for the exporters that consult it.
    #[must_use]
    pub fn from_content(
        title: impl Into<String>,
        content: DocumentContent,
        page_size: PageSize,
    ) -> Self {
        let elements = crate::seed::seed_elements(&content, page_size);
        Self {
            title: title.into(),
            pages: vec![Page { elements }],
            content: Some(content),
            page_size,
        }
    }

    /// Number of pages. Always at least 1.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The elements of page `index`, or an empty slice if the page does
    /// not exist.
    #[must_use]
    pub fn page(&self, index: usize) -> &[Element] {
        self.pages.get(index).map_or(&[], Page::elements)
    }

    /// Iterate over pages in index order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Append a new blank page, returning its index (previous highest + 1).
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len() - 1
    }

    /// Remove the highest-indexed page.
    ///
    /// A document always keeps at least one page: removing when only one
    /// page remains is a no-op. Returns whether a page was removed.
    pub fn remove_last_page(&mut self) -> bool {
        if self.pages.len() <= 1 {
            return false;
        }
        self.pages.pop();
        true
    }

    /// Append an element to the end of page `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PageNotFound`] if the page does not exist, or
    /// [`CoreError::DuplicateElement`] if an element with the same id
    /// already exists anywhere in the document.
    pub fn add_element(&mut self, index: usize, element: Element) -> CoreResult<()> {
        if self.contains(&element.id) {
            return Err(CoreError::DuplicateElement(element.id.to_string()));
        }
        let page = self
            .pages
            .get_mut(index)
            .ok_or(CoreError::PageNotFound(index))?;
        page.elements.push(element);
        Ok(())
    }

    /// Remove the element with the given id from whichever page holds it.
    /// Returns whether an element was removed.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        for page in &mut self.pages {
            let before = page.elements.len();
            page.elements.retain(|element| element.id != *id);
            if page.elements.len() != before {
                return true;
            }
        }
        false
    }

    /// Shallow-merge a patch into the element with the given id. Returns
    /// whether an element was updated.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        for page in &mut self.pages {
            if let Some(element) = page.elements.iter_mut().find(|element| element.id == *id) {
                patch.apply(element);
                return true;
            }
        }
        false
    }

    /// Find an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.pages
            .iter()
            .flat_map(|page| page.elements.iter())
            .find(|element| element.id == *id)
    }

    /// Whether any page holds an element with this id.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Total number of elements across all pages.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::Serialization)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled", PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, TextAlign, TextDecoration};

    fn text_element(content: &str) -> Element {
        Element::new(ElementKind::Text {
            content: content.to_string(),
            font_family: "Arial".to_string(),
            font_size: 16.0,
            fill: "#000000".to_string(),
            bold: false,
            italic: false,
            align: TextAlign::Left,
            decoration: TextDecoration::None,
            wrap_width: None,
        })
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = Document::new("Test", PageSize::A4);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.page(0).is_empty());
    }

    #[test]
    fn test_add_page_returns_next_index() {
        let mut doc = Document::new("Test", PageSize::A4);
        assert_eq!(doc.add_page(), 1);
        assert_eq!(doc.add_page(), 2);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_remove_last_page_keeps_one() {
        let mut doc = Document::new("Test", PageSize::A4);
        doc.add_page();
        assert!(doc.remove_last_page());
        assert_eq!(doc.page_count(), 1);
        // Removing the final page is a no-op.
        assert!(!doc.remove_last_page());
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_missing_page_is_empty_slice() {
        let doc = Document::new("Test", PageSize::A4);
        assert!(doc.page(7).is_empty());
    }

    #[test]
    fn test_add_element_rejects_duplicate_id() {
        let mut doc = Document::new("Test", PageSize::A4);
        doc.add_page();
        let element = text_element("hello");
        let dup = element.clone();
        doc.add_element(0, element).expect("first insert");
        // Same id on a different page must still be rejected.
        let err = doc.add_element(1, dup).expect_err("duplicate");
        assert!(matches!(err, CoreError::DuplicateElement(_)));
    }

    #[test]
    fn test_add_element_to_missing_page() {
        let mut doc = Document::new("Test", PageSize::A4);
        let err = doc.add_element(3, text_element("x")).expect_err("no page");
        assert!(matches!(err, CoreError::PageNotFound(3)));
    }

    #[test]
    fn test_remove_element_by_id() {
        let mut doc = Document::new("Test", PageSize::A4);
        let element = text_element("bye");
        let id = element.id.clone();
        doc.add_element(0, element).expect("insert");
        assert!(doc.remove_element(&id));
        assert!(!doc.remove_element(&id));
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn test_update_element_shallow_merge() {
        let mut doc = Document::new("Test", PageSize::A4);
        let element = text_element("draft");
        let id = element.id.clone();
        doc.add_element(0, element).expect("insert");

        let patch = ElementPatch {
            content: Some("final".to_string()),
            font_size: Some(24.0),
            ..ElementPatch::default()
        };
        assert!(doc.update_element(&id, &patch));

        let updated = doc.element(&id).expect("present");
        match &updated.kind {
            ElementKind::Text {
                content, font_size, ..
            } => {
                assert_eq!(content, "final");
                assert!((font_size - 24.0).abs() < f32::EPSILON);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new("Round Trip", PageSize::A4);
        doc.add_element(0, text_element("persisted")).expect("insert");
        doc.add_page();

        let json = doc.to_json().expect("serialize");
        let back = Document::from_json(&json).expect("deserialize");
        assert_eq!(back.title, "Round Trip");
        assert_eq!(back.page_count(), 2);
        assert_eq!(back.page(0).len(), 1);
    }
}
