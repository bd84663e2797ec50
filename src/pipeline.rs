//! Cleaning pipeline orchestration.
//!
//! Every pass runs once, in a fixed order, while the document is constructed:
//!
//! 1. parse into a `dom_query` document
//! 2. resolve the embedded stylesheet
//! 3. rewrite styled spans into semantic tags
//! 4. merge split links and drop comment threads
//! 5. body pass: detach merged anchors and inline comments, filter
//!    attributes, extract tokens
//! 6. prune empty elements bottom-up
//!
//! Serialization is deferred until the markup is requested.

use std::fmt;

use tracing::debug;

use crate::dom::{self, Document, NodeRef};
use crate::error::Result;
use crate::formatting::rewrite_spans;
use crate::html_processing::{filter_attributes, is_inline_comment, prune_empty};
use crate::links::{normalize_links, Blacklist};
use crate::options::Options;
use crate::result::CleanOutput;
use crate::serialize::render_fragment;
use crate::stylesheet::Stylesheet;
use crate::tokens::{extract_tokens, Tokens};

/// A cleaned document.
///
/// # Example
///
/// ```rust
/// use rs_docclean::CleanDoc;
///
/// let doc = CleanDoc::new("<html><body><p class=\"c1\">Hello</p><p></p></body></html>");
/// assert_eq!(doc.html(), "<p>Hello</p>");
/// ```
pub struct CleanDoc {
    document: Document,
    has_body: bool,
    stylesheet: Stylesheet,
    tokens: Tokens,
    escape_text: bool,
}

impl CleanDoc {
    /// Clean `html` with default options.
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self::build(html, &Options::default())
    }

    /// Clean `html` after validating `options`.
    pub fn with_options(html: &str, options: &Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(html, options))
    }

    fn build(html: &str, options: &Options) -> Self {
        let document = dom::parse(html);
        let has_body = dom::has_body_tag(html);
        let stylesheet = Stylesheet::from_document(&document);

        rewrite_spans(&document, &stylesheet, options);
        let mut blacklist = normalize_links(&document, options);

        let mut tokens = Tokens::new(&options.tokens);
        match dom::body(&document).filter(|_| has_body) {
            Some(body) => {
                clean_body(&body, &mut blacklist, &mut tokens, options);
                prune_empty(&body);
            }
            None => debug!("no body in input; skipping body passes"),
        }

        for id in blacklist.drain() {
            if let Some(anchor) = document.tree.get(&id) {
                dom::remove(&anchor);
            }
        }

        debug!(html_len = html.len(), tokens = tokens.len(), "cleaned document");

        Self {
            document,
            has_body,
            stylesheet,
            tokens,
            escape_text: options.escape_text,
        }
    }

    fn body(&self) -> Option<NodeRef<'_>> {
        self.has_body.then(|| dom::body(&self.document)).flatten()
    }

    /// The cleaned fragment as a single line of HTML.
    ///
    /// Returns an empty string when the input had no body. Calling this
    /// repeatedly yields the same string.
    #[must_use]
    pub fn html(&self) -> String {
        self.body()
            .map(|body| render_fragment(&body, self.escape_text))
            .unwrap_or_default()
    }

    /// Extracted value of a token field.
    #[must_use]
    pub fn token(&self, field: &str) -> Option<&str> {
        self.tokens.get(field)
    }

    #[must_use]
    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// The stylesheet resolved from the input's `<style>` blocks.
    #[must_use]
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// The cleaned document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Render and hand over the fragment together with its tokens.
    #[must_use]
    pub fn into_output(self) -> CleanOutput {
        CleanOutput {
            html: self.html(),
            tokens: self.tokens,
        }
    }
}

impl fmt::Debug for CleanDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanDoc")
            .field("html", &self.html())
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CleanDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html())
    }
}

/// Per-element body pass in document order.
///
/// Elements detached earlier in the pass (with their subtrees) are skipped.
fn clean_body(body: &NodeRef, blacklist: &mut Blacklist, tokens: &mut Tokens, options: &Options) {
    let mut comments = 0;

    for node in dom::descendant_elements(body) {
        if !dom::is_inside(&node, body.id) {
            continue;
        }

        if blacklist.take(node.id) {
            dom::remove(&node);
            continue;
        }

        if is_inline_comment(&node, &options.inline_comment_marker) {
            dom::remove(&node);
            comments += 1;
            continue;
        }

        filter_attributes(&node, options);
        extract_tokens(&node, &options.tokens, tokens);
    }

    debug!(inline_comments = comments, "cleaned body");
}
