//! Error types for formula highlighting

use thiserror::Error;

use crate::syntax::Category;

/// Result type alias for highlighter operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
///
/// Only construction (rule tables, configuration) and I/O can fail.
/// Tokenizing, rendering and caret translation are total.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern for {category:?} rule: {source}")]
    InvalidPattern {
        category: Category,
        #[source]
        source: regex::Error,
    },

    #[error("Rule table has no rules")]
    EmptyRuleTable,

    #[error("Unknown token category: {0}")]
    UnknownCategory(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
