//! Embedded Stylesheet Resolution
//!
//! Word-processor exports carry presentation in `<style>` blocks and reference
//! it through span classes. This module flattens every top-level style rule
//! into a selector → declarations map using Mozilla's `cssparser` tokenizer.
//!
//! At-rules (`@import`, `@media`, `@font-face`, ...) are skipped entirely.
//! A block that cannot be parsed contributes no rules; other blocks are
//! unaffected.

use std::collections::HashMap;

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use tracing::{debug, warn};

use crate::dom::{get_elements_by_tag_name, Document};
use crate::error::{Error, Result};

/// Property name → value for one selector.
pub type Declarations = HashMap<String, String>;

/// Selector → declarations, built once per document.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: HashMap<String, Declarations>,
}

impl Stylesheet {
    /// Collect rules from every `<style>` element in the document.
    ///
    /// Rules are applied in document order; a later rule with the same
    /// selector replaces the earlier one.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let mut sheet = Self::default();

        for (index, style) in get_elements_by_tag_name(doc, "style").iter().enumerate() {
            let css = style.text();
            match parse_stylesheet(&css) {
                Ok(rules) => sheet.extend(rules),
                Err(err) => warn!(block = index, error = %err, "skipping unparsable <style> block"),
            }
        }

        debug!(selectors = sheet.len(), "built stylesheet");
        sheet
    }

    /// Parse a single CSS string.
    ///
    /// Unlike [`Stylesheet::from_document`] this reports the parse failure.
    pub fn parse(css: &str) -> Result<Self> {
        let mut sheet = Self::default();
        sheet.extend(parse_stylesheet(css)?);
        Ok(sheet)
    }

    fn extend(&mut self, rules: Vec<(String, Declarations)>) {
        for (selector, declarations) in rules {
            self.rules.insert(selector, declarations);
        }
    }

    /// Declarations for an exact selector, e.g. `".c3"`.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<&Declarations> {
        self.rules.get(selector)
    }

    /// Declarations for a class name given without its leading dot.
    #[must_use]
    pub fn class(&self, class_name: &str) -> Option<&Declarations> {
        self.get(&format!(".{class_name}"))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse a `property: value; ...` list such as a `style` attribute.
///
/// Malformed declarations are skipped.
#[must_use]
pub fn parse_declaration_list(css: &str) -> Declarations {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_declarations(&mut parser)
}

/// Top-level rule loop.
///
/// A stray `}` or a qualified rule without a `{}` body fails the whole block.
fn parse_stylesheet(css: &str) -> Result<Vec<(String, Declarations)>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = Vec::new();

    while !parser.is_exhausted() {
        let start = parser.position();
        let mut at_rule = false;
        let mut first = true;

        loop {
            let before = parser.position();
            let token = match parser.next().cloned() {
                Ok(token) => token,
                Err(_) if at_rule => break,
                Err(_) => {
                    return Err(Error::Css(format!(
                        "rule `{}` has no declaration block",
                        parser.slice_from(start).trim()
                    )));
                }
            };

            match token {
                Token::AtKeyword(_) if first => at_rule = true,
                Token::CDO | Token::CDC if first => break,
                Token::Semicolon if at_rule => break,
                Token::CurlyBracketBlock => {
                    if !at_rule {
                        let prelude = parser.slice(start..before);
                        let declarations = parser
                            .parse_nested_block(parse_declaration_block)
                            .unwrap_or_default();
                        for selector in prelude.split(',') {
                            let selector = selector.split_whitespace().collect::<Vec<_>>().join(" ");
                            if !selector.is_empty() {
                                rules.push((selector, declarations.clone()));
                            }
                        }
                    }
                    break;
                }
                Token::CloseCurlyBracket => {
                    return Err(Error::Css("unexpected `}`".to_string()));
                }
                _ => {}
            }
            first = false;
        }
    }

    Ok(rules)
}

fn parse_declaration_block<'i>(
    block: &mut Parser<'i, '_>,
) -> std::result::Result<Declarations, ParseError<'i, ()>> {
    Ok(parse_declarations(block))
}

fn parse_declarations(parser: &mut Parser<'_, '_>) -> Declarations {
    let mut declarations = Declarations::new();

    while !parser.is_exhausted() {
        if let Ok((name, value)) = parser.parse_until_after(Delimiter::Semicolon, parse_declaration) {
            if !value.is_empty() {
                declarations.insert(name, value);
            }
        }
    }

    declarations
}

fn parse_declaration<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<(String, String), ParseError<'i, ()>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    parser.expect_colon()?;

    let start = parser.position();
    while parser.next().is_ok() {}

    Ok((name, clean_value(parser.slice_from(start))))
}

/// Trim a raw value and drop a trailing `!important`.
fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            value[..bang].trim_end().to_string()
        }
        _ => value.to_string(),
    }
}
