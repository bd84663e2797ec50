//! Fragment Serialization
//!
//! Renders the cleaned body back to markup. Text is written as the parser
//! decoded it unless escaping is requested, and the result is flattened to a
//! single whitespace-normalized line.
//!
//! `dom_query`'s own `html()` escapes text and writes void elements as `<br>`,
//! so the walk here reads the live `NodeRef`s and writes markup itself.

use crate::dom::{get_all_attributes, is_void_tag, tag_name, NodeRef};
use crate::patterns::WHITESPACE_RUN;

/// Elements whose text content is never escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

enum Step<'a> {
    Open(NodeRef<'a>),
    Close(String),
}

/// Serialize the children of `node` (not `node` itself).
///
/// Comments, doctypes and processing instructions are not written.
#[must_use]
pub fn inner_html(node: &NodeRef, escape: bool) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step<'_>> = node.children().into_iter().rev().map(Step::Open).collect();

    while let Some(step) = stack.pop() {
        let current = match step {
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
                continue;
            }
            Step::Open(current) => current,
        };

        if current.is_text() {
            let text = current.text();
            let raw = current
                .parent()
                .and_then(|parent| tag_name(&parent))
                .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.as_str()));
            if escape && !raw {
                out.push_str(&html_escape::encode_text(&*text));
            } else {
                out.push_str(&text);
            }
            continue;
        }

        let Some(name) = current.is_element().then(|| tag_name(&current)).flatten() else {
            continue;
        };

        out.push('<');
        out.push_str(&name);
        for (key, value) in get_all_attributes(&current) {
            write_attribute(&mut out, &key, &value, escape);
        }

        if is_void_tag(&name) {
            out.push_str("/>");
            continue;
        }

        out.push('>');
        stack.push(Step::Close(name));
        stack.extend(current.children().into_iter().rev().map(Step::Open));
    }

    out
}

fn write_attribute(out: &mut String, key: &str, value: &str, escape: bool) {
    out.push(' ');
    out.push_str(key);
    out.push('=');

    if escape {
        out.push('"');
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    } else if value.contains('"') && !value.contains('\'') {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

/// Collapse every whitespace run to one space and drop stray newlines.
#[must_use]
pub fn normalize_whitespace(html: &str) -> String {
    WHITESPACE_RUN.replace_all(html, " ").replace('\n', "")
}

/// Single-line markup for the children of `node`.
#[must_use]
pub fn render_fragment(node: &NodeRef, escape: bool) -> String {
    normalize_whitespace(&inner_html(node, escape))
}
