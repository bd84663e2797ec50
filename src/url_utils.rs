//! URL Utility Functions
//!
//! Document exports wrap every hyperlink in a tracking redirect such as
//! `https://www.google.com/url?q=https://example.com/&sa=D&ust=...`.
//! These helpers recover the real destination without guessing.

use url::{form_urlencoded, Url};

/// Extract the real destination from a redirect-wrapped href.
///
/// Returns the first non-empty value of the `param` query parameter, or
/// `None` when the href carries no such parameter. Relative hrefs
/// (`/url?q=...`) are handled too.
#[must_use]
pub fn resolve_redirect(href: &str, param: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let query = match Url::parse(href) {
        Ok(url) => url.query()?.to_string(),
        Err(_) => relative_query(href)?.to_string(),
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == param && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Query string of an href that does not parse as an absolute URL.
fn relative_query(href: &str) -> Option<&str> {
    let without_fragment = href.split('#').next()?;
    without_fragment.split_once('?').map(|(_, query)| query)
}

/// Check if a string is a valid absolute `http(s)` URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    let s = s.trim();

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return false;
    }

    Url::parse(s).is_ok_and(|url| url.host().is_some())
}

/// Whether an href points somewhere real on its own: an absolute web URL
/// or a `mailto:` link.
#[must_use]
pub fn is_direct_link(href: &str) -> bool {
    let href = href.trim();
    is_absolute_url(href) || (href.starts_with("mailto:") && href.len() > "mailto:".len())
}
