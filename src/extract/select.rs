//! Typed query helpers over parsed HTML
//!
//! Every structural anchor the extractors rely on goes through one of these
//! named helpers instead of ad-hoc tree walking. Each helper returns `Option`
//! (or an empty collection); the extractor call site decides whether absence
//! is a `MissingField` error or an optional field. When the site's markup
//! shifts, the failure shows up at that one call site.

use scraper::{ElementRef, Html, Selector};

/// Returns the first element matching a CSS selector, searching the document
pub(crate) fn first<'a>(doc: &'a Html, css: &'static str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector).next()
}

/// Returns the first element matching a CSS selector, searching a subtree
pub(crate) fn first_in<'a>(element: ElementRef<'a>, css: &'static str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    element.select(&selector).next()
}

/// Returns every element matching a CSS selector inside a subtree, in
/// document order
pub(crate) fn all_in<'a>(element: ElementRef<'a>, css: &'static str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Finds a label element by tag name whose full text equals `label` exactly
/// (modulo surrounding whitespace)
///
/// The site marks scalar fields with `<strong>Label:</strong>` elements; the
/// value follows as a sibling. Matching is exact, so a renamed label fails
/// extraction instead of silently grabbing the wrong field.
pub(crate) fn find_label<'a>(
    doc: &'a Html,
    tag: &'static str,
    label: &str,
) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    doc.select(&selector)
        .find(|element| element.text().collect::<String>().trim() == label)
}

/// Reads the text node immediately following an element
///
/// Returns `None` when the next sibling is missing, is not a text node, or
/// holds only whitespace.
pub(crate) fn following_text(element: ElementRef<'_>) -> Option<String> {
    let node = element.next_sibling()?;
    let text = node.value().as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Wraps an element's parent node back into an element, if it is one
pub(crate) fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Flattens a subtree to line-separated plain text
///
/// Text fragments are trimmed, empty ones dropped, and the rest joined with
/// newlines; this is how multi-paragraph blocks (synopsis, biography) become
/// storable text.
pub(crate) fn flatten_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the first non-whitespace text fragment of a subtree
pub(crate) fn first_text_fragment(element: ElementRef<'_>) -> Option<String> {
    element
        .text()
        .map(str::trim)
        .find(|fragment| !fragment.is_empty())
        .map(str::to_string)
}

/// Returns the whole text content of an element, trimmed
pub(crate) fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
