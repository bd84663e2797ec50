//! Error types for rs-docclean.
//!
//! Cleaning itself never fails: malformed markup and stylesheets degrade to
//! "no transformation". Errors are reserved for invalid caller configuration
//! and for stylesheet failures that are recovered internally.

/// Error type for cleaning operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A token rule has an empty prefix or an empty field name.
    #[error("Invalid token rule: {0}")]
    InvalidTokenRule(String),

    /// An option that must be non-empty was left empty.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A `<style>` block could not be parsed.
    #[error("Stylesheet parsing failed: {0}")]
    Css(String),
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, Error>;
