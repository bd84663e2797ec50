//! # rs-docclean
//!
//! Cleans HTML exported from cloud word processors into a minimal,
//! semantically tagged fragment that is safe to embed in a CMS or an email.
//!
//! Exports are noisy: styling lives in `<style>` blocks referenced by span
//! classes, links are wrapped in tracking redirects, review comments are
//! embedded in the body, and every element carries attributes nobody needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_docclean::{CleanDoc, Options};
//!
//! let html = r#"<html><head><style>.c1{font-weight:700}</style></head>
//! <body class="c5"><p class="c2">Title: Launch notes</p>
//! <p class="c2"><span class="c1">Ship</span> it.</p><p></p></body></html>"#;
//!
//! let options = Options::with_tokens([("Title:", "title")]);
//! let doc = CleanDoc::with_options(html, &options)?;
//!
//! assert_eq!(doc.token("title"), Some("Launch notes"));
//! assert_eq!(doc.html(), " <p><strong>Ship</strong> it.</p>");
//! # Ok::<(), rs_docclean::Error>(())
//! ```
//!
//! ## Passes
//!
//! - **Stylesheet**: flat class rules from every `<style>` block
//! - **Formatting**: italic/bold/underline classes become `em`/`strong`/`u`
//! - **Links**: redirect hrefs resolve to their real target; split links merge
//! - **Comments**: document comment threads and `##` lines are removed
//! - **Attributes**: only `a[href]` and `img[src, alt]` survive
//! - **Tokens**: labeled lines like `Title: ...` move into named fields
//! - **Pruning**: empty non-void elements are dropped

mod error;
mod options;
mod patterns;
mod pipeline;
mod result;

/// DOM helpers over `dom_query` used by the cleaning passes.
pub mod dom;

/// Embedded `<style>` block resolution.
pub mod stylesheet;

/// Styled span to semantic tag rewriting.
pub mod formatting;

/// Redirect resolution, link merging and comment anchors.
pub mod links;

/// Attribute whitelisting and structural pruning.
pub mod html_processing;

/// Labeled metadata line extraction.
pub mod tokens;

/// Fragment serialization.
pub mod serialize;

/// URL utilities for redirect unwrapping.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, TokenRule};
pub use pipeline::CleanDoc;
pub use result::CleanOutput;
pub use tokens::Tokens;

/// Cleans an HTML document with default options.
///
/// # Example
///
/// ```rust
/// let html = "<body><div style=\"margin:0\"><p>Hi</p></div></body>";
/// assert_eq!(rs_docclean::clean(html), "<div><p>Hi</p></div>");
/// ```
#[must_use]
pub fn clean(html: &str) -> String {
    CleanDoc::new(html).html()
}

/// Cleans an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_docclean::{clean_with_options, Options};
///
/// let options = Options::with_tokens([("Slug:", "slug")]);
/// let output = clean_with_options("<body><p>Slug: q3</p><p>Body</p></body>", &options)?;
///
/// assert_eq!(output.html, "<p>Body</p>");
/// assert_eq!(output.tokens.get("slug"), Some("q3"));
/// # Ok::<(), rs_docclean::Error>(())
/// ```
pub fn clean_with_options(html: &str, options: &Options) -> Result<CleanOutput> {
    CleanDoc::with_options(html, options).map(CleanDoc::into_output)
}
