//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate shared by the candidate locator,
//! the noise filter and the link classifier.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Lowercased `id` and `class` joined by a space, for keyword matching.
#[must_use]
pub fn id_and_class(sel: &Selection) -> String {
    let id = id(sel).unwrap_or_default();
    let class = class_name(sel).unwrap_or_default();
    format!("{id} {class}").to_lowercase()
}

/// Whether the element's id or class contains any of `keywords`.
#[must_use]
pub fn has_keyword(sel: &Selection, keywords: &[&str]) -> bool {
    let haystack = id_and_class(sel);
    keywords.iter().any(|k| haystack.contains(k))
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Visible text length: the sum of the trimmed lengths of every descendant
/// text node, in characters.
///
/// Whitespace-only indentation between tags does not count, so a block's
/// length does not depend on how its markup is formatted.
#[must_use]
pub fn visible_text_len(sel: &Selection) -> usize {
    let Some(root) = sel.nodes().first() else {
        return 0;
    };
    root.descendants()
        .iter()
        .filter(|node| node.is_text())
        .map(|node| node.text().trim().chars().count())
        .sum()
}

/// Text of every descendant text node joined by `separator`, untrimmed.
#[must_use]
pub fn text_with_separator(sel: &Selection, separator: &str) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };
    let parts: Vec<String> = root
        .descendants()
        .iter()
        .filter(|node| node.is_text())
        .map(|node| node.text().to_string())
        .collect();
    parts.join(separator)
}

// === Tree Manipulation ===

/// Remove every node in `nodes` from the tree.
///
/// Callers must finish matching before calling this. Nodes nested inside an
/// earlier entry are detached together with it; removing them again only
/// unlinks them from an already detached parent.
pub fn remove_all(nodes: &[NodeRef]) {
    for node in nodes {
        Selection::from(*node).remove();
    }
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
