//! Formula syntax module
//!
//! This module provides the lexical side of highlighting:
//! - Categories and their style tags
//! - Ordered, anchored rule tables
//! - The priority-match tokenizer

mod style;
mod tokens;
mod rules;
mod builtin;
mod tokenizer;

pub use style::{Color, Style};
pub use tokens::Category;
pub use rules::{Rule, RuleTable};
pub use builtin::{formula_rules, formula_table};
pub use tokenizer::{Token, Tokenizer};
