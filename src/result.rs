//! Result types for cleaning output.

use serde::{Deserialize, Serialize};

use crate::tokens::Tokens;

/// Cleaned fragment plus the metadata tokens pulled out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOutput {
    /// Single-line HTML fragment of the body's cleaned children.
    ///
    /// Empty when the input had no body.
    pub html: String,

    /// Extracted token fields, keyed by field name.
    pub tokens: Tokens,
}
