#![allow(clippy::expect_used)]

use rs_docclean::{clean, clean_with_options, CleanDoc, Error, Options, TokenRule};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();

    assert!(options.tokens.is_empty());
    assert_eq!(options.comment_id_prefix, "cmnt");
    assert_eq!(options.inline_comment_marker, "##");
    assert_eq!(options.redirect_param, "q");
    assert!(!options.inline_styles);
    assert!(!options.keep_direct_links);
    assert!(!options.escape_text);
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        keep_direct_links: true,
        tokens: vec![TokenRule::new("Slug:", "slug")],
        ..Options::default()
    };

    assert!(options.keep_direct_links);
    assert_eq!(options.redirect_param, "q");
    assert_eq!(options.tokens[0].field, "slug");
}

#[test]
fn invalid_options_are_reported_not_applied() {
    let empty_prefix = Options::with_tokens([("", "title")]);
    assert!(matches!(
        clean_with_options("<body><p>x</p></body>", &empty_prefix),
        Err(Error::InvalidTokenRule(_))
    ));

    let empty_param = Options {
        redirect_param: String::new(),
        ..Options::default()
    };
    let err = CleanDoc::with_options("<body></body>", &empty_param).expect_err("empty param");
    assert_eq!(err.to_string(), "Invalid option: `redirect_param` must not be empty");
}

#[test]
fn keep_direct_links_preserves_plain_hrefs() {
    let html = r#"<body><p><a href="https://example.com/page">x</a> <a href="mailto:a@example.com">m</a></p></body>"#;

    assert_eq!(clean(html), r#"<p><a href="">x</a> <a href="">m</a></p>"#);

    let options = Options {
        keep_direct_links: true,
        ..Options::default()
    };
    let output = clean_with_options(html, &options).expect("valid options");
    assert_eq!(
        output.html,
        r#"<p><a href="https://example.com/page">x</a> <a href="mailto:a@example.com">m</a></p>"#
    );
}

#[test]
fn inline_styles_option_reads_style_attributes() {
    let html = r#"<body><p><span style="font-style: italic">x</span></p></body>"#;

    assert_eq!(clean(html), "<p>x</p>");

    let options = Options {
        inline_styles: true,
        ..Options::default()
    };
    let output = clean_with_options(html, &options).expect("valid options");
    assert_eq!(output.html, "<p><em>x</em></p>");
}

#[test]
fn custom_markers() {
    let html = r##"<body><p>// draft note</p><p>## kept</p><p>Text<sup><a href="#note1" id="note_ref1">[1]</a></sup></p></body>"##;
    let options = Options {
        comment_id_prefix: "note".to_string(),
        inline_comment_marker: "//".to_string(),
        ..Options::default()
    };
    let output = clean_with_options(html, &options).expect("valid options");

    assert_eq!(output.html, "<p>## kept</p><p>Text</p>");
}

#[test]
fn custom_redirect_param() {
    let html = r#"<body><a href="https://t.example/r?url=https://dest.example/&amp;q=https://wrong.example/">go</a></body>"#;
    let options = Options {
        redirect_param: "url".to_string(),
        ..Options::default()
    };
    let output = clean_with_options(html, &options).expect("valid options");

    assert_eq!(output.html, r#"<a href="https://dest.example/">go</a>"#);
}

#[test]
fn options_deserialize_with_defaults() {
    let json = r#"{"tokens":[{"prefix":"Title:","field":"title"}],"escape_text":true}"#;
    let options: Options = serde_json::from_str(json).expect("valid json");

    assert_eq!(options.tokens, vec![TokenRule::new("Title:", "title")]);
    assert!(options.escape_text);
    assert_eq!(options.comment_id_prefix, "cmnt");
    assert_eq!(options.inline_comment_marker, "##");
}

#[test]
fn output_serializes_unmatched_tokens_as_null() {
    let options = Options::with_tokens([("Title:", "title"), ("Author:", "author")]);
    let output = clean_with_options("<body><p>Title: Hi</p><p>x</p></body>", &options).expect("valid options");
    let value = serde_json::to_value(&output).expect("serializable");

    assert_eq!(
        value,
        serde_json::json!({
            "html": "<p>x</p>",
            "tokens": { "author": null, "title": "Hi" }
        })
    );
}

#[test]
fn instances_do_not_share_token_state() {
    let options = Options::with_tokens([("Title:", "title")]);
    let first = CleanDoc::with_options("<body><p>Title: One</p></body>", &options).expect("valid options");
    let second = CleanDoc::with_options("<body><p>Nothing</p></body>", &options).expect("valid options");

    assert_eq!(first.token("title"), Some("One"));
    assert_eq!(second.token("title"), None);
}
