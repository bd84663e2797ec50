//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by every cleaning pass. The
//! document is edited in place: passes snapshot a node list, mutate the tree
//! between steps, and re-check attachment before touching a node again.
//!
//! Removed nodes stay in the `dom_query` arena but are unreachable from the
//! document root and are never re-attached.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for text contents
pub use tendril::StrTendril;

use crate::patterns::SOURCE_MARKUP;

/// Void elements cannot have children and are never considered empty.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

// === Parsing ===

/// Parse an HTML string into a mutable document.
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Whether the source markup opens a real `<body>` element.
///
/// The parser synthesizes `<body>` for every document, so presence is decided
/// from the source. Matches inside comments, raw-text elements (`script`,
/// `style`, `title`, ...) and quoted attribute values do not count.
#[must_use]
pub fn has_body_tag(html: &str) -> bool {
    SOURCE_MARKUP
        .captures_iter(html)
        .any(|caps| caps.name("body").is_some())
}

/// The document's `<body>` element, if it is still attached.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

// === Tag/Node Information ===

/// Get tag name (lowercase), `None` for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|name| name.to_ascii_lowercase())
}

/// Whether `node` is an element named `tag`.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.node_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Check if a tag name is a void element (self-closing)
#[must_use]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Check if element is a void element (self-closing)
#[must_use]
pub fn is_void_element(node: &NodeRef) -> bool {
    tag_name(node).is_some_and(|tag| is_void_tag(&tag))
}

// === Attribute Operations ===

/// Get any attribute value
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|value| value.to_string())
}

/// All attributes as ordered key-value pairs.
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Set an attribute value, keeping its position if it already exists.
#[inline]
pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    node.set_attr(name, value);
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    node.remove_attr(name);
}

/// Whitespace-separated entries of the `class` attribute.
#[must_use]
pub fn classes(node: &NodeRef) -> Vec<String> {
    node.attr("class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// === Text Content ===

/// Concatenated text of a node and its descendants.
///
/// Returns `None` for nodes with no text representation (the document root).
#[must_use]
pub fn text_content(node: &NodeRef) -> Option<StrTendril> {
    if node.is_document() {
        None
    } else {
        Some(node.text())
    }
}

/// Whether any descendant text contains a non-whitespace character.
#[must_use]
pub fn has_visible_text(node: &NodeRef) -> bool {
    text_content(node).is_some_and(|text| !text.trim().is_empty())
}

// === Tree Navigation ===

/// Whether `ancestor` is `node` itself or one of its ancestors.
#[must_use]
pub fn is_inside(node: &NodeRef, ancestor: NodeId) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.id == ancestor {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Whether `node` is still reachable from the document root.
#[must_use]
pub fn is_attached(node: &NodeRef) -> bool {
    let mut top = *node;
    while let Some(parent) = top.parent() {
        top = parent;
    }
    top.is_document()
}

/// Element and text children, skipping comments and other node kinds.
#[must_use]
pub fn content_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(|child| child.is_element() || child.is_text())
        .collect()
}

/// Descendant elements of `node` in document order, `node` excluded.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(|descendant| descendant.is_element())
        .collect()
}

/// Get elements by tag name, in document order.
#[must_use]
pub fn get_elements_by_tag_name<'a>(doc: &'a Document, tag: &str) -> Vec<NodeRef<'a>> {
    doc.select(tag).nodes().to_vec()
}

// === Tree Manipulation ===

/// Remove a node (and its subtree) from the tree.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Remove elements but keep their children (unwrap)
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}

/// Wrap `node` in a new element named `tag` placed at its position.
///
/// Returns the wrapper, or `None` when `node` has no parent.
pub fn wrap<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    node.parent()?;
    let wrapper = node.tree.new_element(tag);
    node.insert_before(&wrapper);
    wrapper.append_child(node);
    Some(wrapper)
}

/// Append a text node holding `text` as the last child of `node`.
pub fn append_text(node: &NodeRef, text: &str) {
    let text_node = node.tree.new_text(text);
    node.append_child(&text_node);
}
