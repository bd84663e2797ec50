//! Configuration options for document cleaning.
//!
//! The `Options` struct controls which markers the cleaner recognizes and
//! which metadata tokens it pulls out of the document body.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A labeled metadata line to extract from the body.
///
/// The first element whose text starts with `prefix` fills `field` with the
/// trimmed text after its first colon and is removed from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRule {
    /// Text the element must start with, e.g. `"Title:"`.
    pub prefix: String,

    /// Name of the output field the value is stored under.
    pub field: String,
}

impl TokenRule {
    /// Build a rule from a prefix and a field name.
    #[must_use]
    pub fn new(prefix: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            field: field.into(),
        }
    }
}

impl<P: Into<String>, F: Into<String>> From<(P, F)> for TokenRule {
    fn from((prefix, field): (P, F)) -> Self {
        Self::new(prefix, field)
    }
}

/// Configuration options for document cleaning.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings; every instance owns its own token list.
///
/// # Example
///
/// ```rust
/// use rs_docclean::{Options, TokenRule};
///
/// let options = Options {
///     tokens: vec![TokenRule::new("Title:", "title")],
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Metadata lines to extract, in priority order.
    ///
    /// Default: empty
    pub tokens: Vec<TokenRule>,

    /// Anchor `id` prefix marking an embedded document comment.
    ///
    /// The parent of a matching anchor is removed.
    ///
    /// Default: `"cmnt"`
    pub comment_id_prefix: String,

    /// Text marker for inline editorial comments.
    ///
    /// Elements whose text starts with this marker are removed.
    ///
    /// Default: `"##"`
    pub inline_comment_marker: String,

    /// Query parameter carrying the real destination of a redirect href.
    ///
    /// Default: `"q"`
    pub redirect_param: String,

    /// Also read `style="..."` attributes on spans when choosing semantic tags.
    ///
    /// Default: `false`
    pub inline_styles: bool,

    /// Keep absolute hrefs that are not redirect-wrapped instead of blanking them.
    ///
    /// Default: `false`
    pub keep_direct_links: bool,

    /// Escape `&`, `<` and `>` in serialized text and attribute values.
    ///
    /// Default: `false` (text is emitted exactly as decoded by the parser)
    pub escape_text: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            comment_id_prefix: "cmnt".to_string(),
            inline_comment_marker: "##".to_string(),
            redirect_param: "q".to_string(),
            inline_styles: false,
            keep_direct_links: false,
            escape_text: false,
        }
    }
}

impl Options {
    /// Options extracting the given `(prefix, field)` token pairs.
    #[must_use]
    pub fn with_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenRule>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check that markers are non-empty and every token rule is usable.
    ///
    /// An empty prefix would match every element, and an empty marker would
    /// remove every element, so both are rejected.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.tokens {
            if rule.prefix.is_empty() {
                return Err(Error::InvalidTokenRule(format!(
                    "empty prefix for field `{}`",
                    rule.field
                )));
            }
            if rule.field.is_empty() {
                return Err(Error::InvalidTokenRule(format!(
                    "empty field name for prefix `{}`",
                    rule.prefix
                )));
            }
        }

        for (name, value) in [
            ("comment_id_prefix", &self.comment_id_prefix),
            ("inline_comment_marker", &self.inline_comment_marker),
            ("redirect_param", &self.redirect_param),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidOption(format!("`{name}` must not be empty")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(opts.tokens.is_empty());
        assert_eq!(opts.comment_id_prefix, "cmnt");
        assert_eq!(opts.inline_comment_marker, "##");
        assert_eq!(opts.redirect_param, "q");
        assert!(!opts.inline_styles);
        assert!(!opts.keep_direct_links);
        assert!(!opts.escape_text);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_defaults_do_not_share_token_lists() {
        let mut first = Options::default();
        first.tokens.push(TokenRule::new("Title:", "title"));

        let second = Options::default();
        assert!(second.tokens.is_empty());
    }

    #[test]
    fn test_with_tokens_keeps_order() {
        let opts = Options::with_tokens([("Title:", "title"), ("Author:", "author")]);

        assert_eq!(opts.tokens.len(), 2);
        assert_eq!(opts.tokens[0], TokenRule::new("Title:", "title"));
        assert_eq!(opts.tokens[1].field, "author");
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let opts = Options::with_tokens([("", "title")]);

        assert!(matches!(opts.validate(), Err(Error::InvalidTokenRule(_))));
    }

    #[test]
    fn test_validate_rejects_empty_field() {
        let opts = Options::with_tokens([("Title:", "")]);

        assert!(matches!(opts.validate(), Err(Error::InvalidTokenRule(_))));
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let opts = Options {
            inline_comment_marker: String::new(),
            ..Options::default()
        };

        assert_eq!(
            opts.validate(),
            Err(Error::InvalidOption(
                "`inline_comment_marker` must not be empty".to_string()
            ))
        );
    }
}
