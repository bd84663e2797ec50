//! Inline-Style Rewriting
//!
//! Converts class-styled `<span>` wrappers into semantic formatting tags and
//! then removes the spans themselves, keeping their contents in place.

use tracing::debug;

use crate::dom::{self, Document, NodeRef};
use crate::options::Options;
use crate::stylesheet::{parse_declaration_list, Declarations, Stylesheet};

/// A CSS property/value pair that maps to a semantic tag.
#[derive(Debug, Clone, Copy)]
pub struct SemanticStyle {
    pub tag: &'static str,
    pub property: &'static str,
    pub values: &'static [&'static str],
}

/// Whitelisted styles in wrap order: the first entry becomes the outermost tag.
pub static STYLE_WHITELIST: [SemanticStyle; 3] = [
    SemanticStyle {
        tag: "em",
        property: "font-style",
        values: &["italic"],
    },
    SemanticStyle {
        tag: "strong",
        property: "font-weight",
        values: &["bold", "700"],
    },
    SemanticStyle {
        tag: "u",
        property: "text-decoration",
        values: &["underline"],
    },
];

impl SemanticStyle {
    fn matches(&self, declarations: &Declarations) -> bool {
        declarations.get(self.property).is_some_and(|value| {
            self.values
                .iter()
                .any(|allowed| value.eq_ignore_ascii_case(allowed))
        })
    }
}

/// Semantic tags a span should be wrapped in, outermost first.
///
/// Classes missing from the stylesheet contribute nothing.
#[must_use]
pub fn semantic_tags(span: &NodeRef, sheet: &Stylesheet, options: &Options) -> Vec<&'static str> {
    let inline = if options.inline_styles {
        dom::get_attribute(span, "style").map(|style| parse_declaration_list(&style))
    } else {
        None
    };

    let mut sources: Vec<&Declarations> = dom::classes(span)
        .iter()
        .filter_map(|class_name| sheet.class(class_name))
        .collect();
    if let Some(inline) = &inline {
        sources.push(inline);
    }

    STYLE_WHITELIST
        .iter()
        .filter(|style| sources.iter().any(|declarations| style.matches(declarations)))
        .map(|style| style.tag)
        .collect()
}

/// Wrap every span in its semantic tags, then unwrap all spans.
///
/// Returns the number of semantic tags added.
pub fn rewrite_spans(doc: &Document, sheet: &Stylesheet, options: &Options) -> usize {
    let mut added = 0;

    for span in dom::get_elements_by_tag_name(doc, "span") {
        for tag in semantic_tags(&span, sheet, options) {
            if dom::wrap(&span, tag).is_some() {
                added += 1;
            }
        }
    }
    dom::strip_tags(&doc.select("html"), &["span"]);

    debug!(added, "rewrote styled spans");
    added
}
