//! HTML Processing and Pruning
//!
//! Attribute whitelisting and structural pruning of the cleaned tree.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::dom::{self, NodeRef};
use crate::links::real_href;
use crate::options::Options;

/// Allowed attributes per tag. Tags not listed keep no attributes at all.
pub static ATTRIBUTE_WHITELIST: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        [
            ("a", &["href"] as &[&str]),
            ("img", &["src", "alt"] as &[&str]),
        ]
            .into_iter()
            .collect()
    });

// === Attribute Filtering ===

/// Drop every attribute the whitelist does not allow for this tag.
///
/// Anchor hrefs are rewritten to their real destination in the same pass,
/// or emptied when they cannot be resolved.
pub fn filter_attributes(node: &NodeRef, options: &Options) {
    let Some(tag) = dom::tag_name(node) else {
        return;
    };
    let allowed = ATTRIBUTE_WHITELIST.get(tag.as_str()).copied().unwrap_or_default();

    for (name, _) in dom::get_all_attributes(node) {
        if !allowed.contains(&name.as_str()) {
            dom::remove_attribute(node, &name);
        }
    }

    if tag == "a" {
        if let Some(href) = dom::get_attribute(node, "href") {
            dom::set_attribute(node, "href", &real_href(&href, options).unwrap_or_default());
        }
    }
}

// === Pruning ===

/// Whether an element's full text starts with the inline comment marker.
#[must_use]
pub fn is_inline_comment(node: &NodeRef, marker: &str) -> bool {
    node.is_element() && dom::text_content(node).is_some_and(|text| text.starts_with(marker))
}

/// Whether an element has no child nodes, no visible text, and is not void.
///
/// Comment nodes do not count as children.
#[must_use]
pub fn is_empty_element(node: &NodeRef) -> bool {
    node.is_element()
        && dom::content_children(node).is_empty()
        && !dom::has_visible_text(node)
        && !dom::is_void_element(node)
}

/// Delete empty elements under `root`, innermost first.
///
/// Processing in reverse document order means a parent is checked after its
/// children, so containers emptied by earlier removals go too.
pub fn prune_empty(root: &NodeRef) -> usize {
    let mut removed = 0;

    for node in dom::descendant_elements(root).into_iter().rev() {
        if dom::is_inside(&node, root.id) && is_empty_element(&node) {
            dom::remove(&node);
            removed += 1;
        }
    }

    debug!(removed, "pruned empty elements");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
        dom::get_elements_by_tag_name(doc, tag)[0]
    }

    #[test]
    fn test_img_keeps_src_and_alt_only() {
        let doc = dom::parse(
            r#"<body><img onclick="x()" src="a.png" style="width:1px" alt="A"></body>"#,
        );
        let img = first(&doc, "img");
        filter_attributes(&img, &Options::default());

        assert_eq!(
            dom::get_all_attributes(&img),
            [
                ("src".to_string(), "a.png".to_string()),
                ("alt".to_string(), "A".to_string())
            ]
        );
    }

    #[test]
    fn test_unlisted_tag_loses_everything() {
        let doc = dom::parse(r#"<body><div class="c1" id="x" dir="ltr">t</div></body>"#);
        let div = first(&doc, "div");
        filter_attributes(&div, &Options::default());

        assert!(dom::get_all_attributes(&div).is_empty());
    }

    #[test]
    fn test_anchor_href_is_resolved() {
        let doc = dom::parse(
            r#"<body><a class="c2" href="https://www.google.com/url?q=https://example.com/x&amp;sa=D">t</a></body>"#,
        );
        let a = first(&doc, "a");
        filter_attributes(&a, &Options::default());

        assert_eq!(dom::get_all_attributes(&a).len(), 1);
        assert_eq!(dom::get_attribute(&a, "href").as_deref(), Some("https://example.com/x"));
    }

    #[test]
    fn test_unresolved_href_is_emptied() {
        let doc = dom::parse(r##"<body><a href="#h.abc">t</a></body>"##);
        let a = first(&doc, "a");
        filter_attributes(&a, &Options::default());

        assert_eq!(dom::get_attribute(&a, "href").as_deref(), Some(""));
    }

    #[test]
    fn test_direct_href_kept_when_enabled() {
        let doc = dom::parse(r#"<body><a href="https://example.com/">t</a></body>"#);
        let a = first(&doc, "a");
        let options = Options {
            keep_direct_links: true,
            ..Options::default()
        };
        filter_attributes(&a, &options);

        assert_eq!(dom::get_attribute(&a, "href").as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn test_inline_comment_detection() {
        let doc = dom::parse("<body><p>## remove me</p><p>keep ## me</p></body>");
        let ps = dom::get_elements_by_tag_name(&doc, "p");

        assert!(is_inline_comment(&ps[0], "##"));
        assert!(!is_inline_comment(&ps[1], "##"));
    }

    #[test]
    fn test_prune_empty_keeps_void_and_whitespace_children() {
        let doc = dom::parse("<body><p></p><p><br></p><p> </p><p>text</p></body>");
        let body = dom::body(&doc).unwrap();

        assert_eq!(prune_empty(&body), 1);
        assert_eq!(dom::get_elements_by_tag_name(&doc, "p").len(), 3);
        assert_eq!(dom::get_elements_by_tag_name(&doc, "br").len(), 1);
    }

    #[test]
    fn test_prune_empty_cascades_to_parents() {
        let doc = dom::parse("<body><div><p></p><ul><li></li></ul></div><p>x</p></body>");
        let body = dom::body(&doc).unwrap();

        assert_eq!(prune_empty(&body), 4);
        assert!(dom::get_elements_by_tag_name(&doc, "div").is_empty());
        assert_eq!(body.text().to_string(), "x");
    }

    #[test]
    fn test_comment_only_element_is_empty() {
        let doc = dom::parse("<body><p><!-- note --></p><p>x</p></body>");
        let body = dom::body(&doc).unwrap();

        assert_eq!(prune_empty(&body), 1);
        assert_eq!(dom::get_elements_by_tag_name(&doc, "p").len(), 1);
    }
}
