//! Token Extraction
//!
//! Documents often open with labeled metadata lines such as
//! `Title: Quarterly report` or `Slug: q3-report`. Each configured rule pulls
//! the first matching line into a named field and removes it from the body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::{self, NodeRef};
use crate::options::TokenRule;

/// Named output fields, each filled at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tokens {
    fields: BTreeMap<String, Option<String>>,
}

impl Tokens {
    /// One empty slot per distinct field named by `rules`.
    #[must_use]
    pub fn new(rules: &[TokenRule]) -> Self {
        Self {
            fields: rules
                .iter()
                .map(|rule| (rule.field.clone(), None))
                .collect(),
        }
    }

    /// Extracted value for `field`, `None` if it never matched or was not requested.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn is_filled(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(Some(_)))
    }

    /// Store a value unless the field already has one.
    ///
    /// An empty value still fills the field: a bare `Author:` line claims
    /// `author`, and later `Author:` lines are left in the body. Presence is
    /// what counts here, not a non-empty value.
    ///
    /// Returns whether the value was stored.
    pub fn fill(&mut self, field: &str, value: String) -> bool {
        if self.is_filled(field) {
            return false;
        }
        self.fields.insert(field.to_string(), Some(value));
        true
    }

    /// Filled fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(field, value)| value.as_deref().map(|value| (field.as_str(), value)))
    }

    /// Number of filled fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Value of a token line: everything after the first colon, trimmed.
///
/// Lines without a colon yield their whole trimmed text.
#[must_use]
pub fn token_value(text: &str) -> String {
    text.split_once(':')
        .map_or(text, |(_, value)| value)
        .trim()
        .to_string()
}

/// Try every unfilled rule against one element.
///
/// An element can satisfy several rules at once; it is detached if it
/// satisfied any. Nodes without a text representation are skipped.
pub fn extract_tokens(node: &NodeRef, rules: &[TokenRule], tokens: &mut Tokens) -> bool {
    let Some(text) = dom::text_content(node) else {
        return false;
    };

    let mut matched = false;
    for rule in rules {
        if !tokens.is_filled(&rule.field) && text.starts_with(&rule.prefix) {
            matched |= tokens.fill(&rule.field, token_value(&text));
        }
    }

    if matched {
        dom::remove(node);
    }
    matched
}
