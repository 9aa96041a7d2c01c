//! formula-hl - live syntax highlighting for single-line formula editors
//!
//! Raw formula text is split into tokens by an ordered rule table,
//! rendered as styled, whitespace-free chunks, and the editor caret is
//! carried across the re-render as a visible-text offset.

pub mod config;
pub mod error;
pub mod highlighter;
pub mod render;
pub mod syntax;
pub mod terminal;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use highlighter::{Highlighter, Reformatted};
pub use render::{CaretAnchor, CaretIndex, Chunk, RenderedFormula};
pub use syntax::{Category, Rule, RuleTable, Token, Tokenizer};
