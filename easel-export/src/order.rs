//! Render-order policy shared by all exporters.

use easel_core::Element;

/// Arrange a page's elements into paint order: every text element paints
/// after every non-text element, each subgroup keeping its stored relative
/// order. This is a render-time view; the page itself is never reordered.
#[must_use]
pub fn paint_order(elements: &[Element]) -> Vec<&Element> {
    let mut ordered: Vec<&Element> = elements.iter().collect();
    // Stable: equal keys keep their insertion order.
    ordered.sort_by_key(|element| usize::from(element.is_text()));
    ordered
}
