//! Compiled regex patterns used by the cleaning pipeline.
//!
//! All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Elements whose contents the HTML tokenizer reads as plain text.
const RAW_TEXT_TAGS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

/// Tokenizes source markup far enough to find real start tags.
///
/// Alternatives are tried in order at each position: comments and raw-text
/// elements are consumed whole, then a `<body>` start tag is captured as
/// `body`, then any other start tag is consumed with its quoted attribute
/// values. The parser synthesizes a body for every document, so body
/// presence is decided from this scan.
pub static SOURCE_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    let raw_text = RAW_TEXT_TAGS
        .iter()
        .map(|tag| format!(r"<{tag}\b[^>]*>.*?(?:</{tag}\s*>|\z)"))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r#"(?is)<!--.*?(?:-->|\z)|{raw_text}|(?P<body><body[\s/>])|<[a-z][^\s/>]*(?:[^>"']|"[^"]*"|'[^']*')*>"#
    );
    Regex::new(&pattern).expect("SOURCE_MARKUP regex")
});

/// Matches any run of whitespace, newlines included.
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUN regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn body_matches(html: &str) -> usize {
        SOURCE_MARKUP
            .captures_iter(html)
            .filter(|caps| caps.name("body").is_some())
            .count()
    }

    #[test]
    fn test_body_start_tag() {
        assert_eq!(body_matches("<body>"), 1);
        assert_eq!(body_matches("<BODY class=\"c5\">"), 1);
        assert_eq!(body_matches("<body\n>"), 1);
        assert_eq!(body_matches("<bodyguard>"), 0);
        assert_eq!(body_matches("<p>body</p>"), 0);
    }

    #[test]
    fn test_comments_and_raw_text_are_skipped() {
        assert_eq!(body_matches("<!-- <body> -->"), 0);
        assert_eq!(body_matches("<!-- unterminated <body>"), 0);
        assert_eq!(body_matches("<style>/* <body> */</style><body>"), 1);
        assert_eq!(body_matches("<SCRIPT>'<body>'</SCRIPT>"), 0);
        assert_eq!(body_matches("<textarea><body></textarea>"), 0);
    }

    #[test]
    fn test_quoted_attribute_values_are_skipped() {
        assert_eq!(body_matches(r#"<a title="<body>">x</a>"#), 0);
        assert_eq!(body_matches(r#"<img alt='a > <body>'>"#), 0);
    }

    #[test]
    fn test_whitespace_run() {
        assert_eq!(WHITESPACE_RUN.replace_all("a\n\n  b\t c", " "), "a b c");
    }
}
