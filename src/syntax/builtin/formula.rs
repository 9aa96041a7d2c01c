//! Formula language rule table
//!
//! Order is the contract here: there is no keyword pass after matching,
//! so every ambiguity between categories is settled by position alone.
//! `-5` lexes as an operator then a number because operators come first.

use crate::error::Result;
use crate::syntax::rules::{Rule, RuleTable};
use crate::syntax::tokens::Category;

/// Built-in formula patterns, highest priority first
const FORMULA_PATTERNS: [(Category, &str); 14] = [
    // U+FEFF counts as whitespace in browser regexes but not in Unicode
    (Category::Whitespace, r"[\s\x{FEFF}]"),
    (Category::Identifier, r"[A-Za-z][A-Za-z]?[0-9]{1,3}"),
    (Category::ArithmeticOperator, r"[+\-*/]"),
    (Category::Number, r"[+\-]?[0-9]+(?:\.[0-9]*)?"),
    // Greedy: runs to the last quote on the line
    (Category::String, r#"".*""#),
    (Category::Equals, r"="),
    (Category::RelOperator, r"<=?|>=?|!="),
    (Category::LogicalOperator, r"and|or|xor"),
    (Category::UnaryLogicalOperator, r"not"),
    (Category::Semicolon, r";"),
    (Category::LeftParen, r"\("),
    (Category::RightParen, r"\)"),
    (Category::Function, r"if|exp|log|find"),
    // Fallback: swallows the rest of the input
    (Category::Unknown, r"(?s).+"),
];

/// Built-in formula rules with their default style tags
pub fn formula_rules() -> Result<Vec<Rule>> {
    FORMULA_PATTERNS
        .iter()
        .map(|(category, pattern)| Rule::new(*category, pattern))
        .collect()
}

/// Built-in formula rule table
pub fn formula_table() -> Result<RuleTable> {
    RuleTable::new(formula_rules()?)
}
