//! Priority-match tokenizer
//!
//! Splits a formula into a lossless, contiguous sequence of tokens by
//! repeatedly taking the first rule in table order that matches at the
//! cursor.

use std::sync::Arc;

use tracing::{debug, trace};

use super::rules::RuleTable;
use super::tokens::Category;

/// A token: a slice of the input plus where it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    pub category: Category,
    /// Exact slice of the original input
    pub text: &'t str,
    /// Character offset of the first character in the original input
    pub start: usize,
}

impl<'t> Token<'t> {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.char_len()
    }
}

/// Tokenizer bound to an immutable rule table
#[derive(Debug, Clone)]
pub struct Tokenizer {
    table: Arc<RuleTable>,
}

impl Tokenizer {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Tokenize `text`. Never fails and always consumes the whole input.
    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut offset = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let (category, len) = match self.table.first_match(rest) {
                Some((rule, len)) => (rule.category(), len),
                // Nothing matched: take one character so we keep moving
                None => (Category::Unknown, rest.chars().next().map_or(1, char::len_utf8)),
            };

            let token = Token {
                category,
                text: &rest[..len],
                start: offset,
            };
            trace!(target: "formula.tokenizer", "emit token: {token:?}");

            offset += token.char_len();
            pos += len;
            tokens.push(token);
        }

        debug!(target: "formula.tokenizer", tokens = tokens.len(), chars = offset, "tokenized");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builtin::formula_table;
    use crate::syntax::rules::Rule;
    use proptest::prelude::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(Arc::new(formula_table().unwrap()))
    }

    fn shape(text: &str) -> Vec<(Category, String)> {
        tokenizer()
            .tokenize(text)
            .into_iter()
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenizer().tokenize("").is_empty());
    }

    #[test]
    fn test_function_wins_by_order() {
        assert_eq!(shape("if"), vec![(Category::Function, "if".to_string())]);
    }

    #[test]
    fn test_assignment() {
        let tokens = tokenizer().tokenize("x1=5");
        let got: Vec<_> = tokens.iter().map(|t| (t.category, t.text, t.start)).collect();
        assert_eq!(
            got,
            vec![
                (Category::Identifier, "x1", 0),
                (Category::Equals, "=", 2),
                (Category::Number, "5", 3),
            ]
        );
    }

    #[test]
    fn test_whitespace_tokens_are_kept() {
        assert_eq!(
            shape("a1 + b2"),
            vec![
                (Category::Identifier, "a1".to_string()),
                (Category::Whitespace, " ".to_string()),
                (Category::ArithmeticOperator, "+".to_string()),
                (Category::Whitespace, " ".to_string()),
                (Category::Identifier, "b2".to_string()),
            ]
        );
    }

    #[test]
    fn test_each_space_is_its_own_token() {
        let tokens = tokenizer().tokenize("a1  b2");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].category, Category::Whitespace);
        assert_eq!(tokens[2].category, Category::Whitespace);
        assert_eq!(tokens[2].start, 3);
    }

    #[test]
    fn test_unknown_run() {
        assert_eq!(shape("@"), vec![(Category::Unknown, "@".to_string())]);
        assert_eq!(
            shape("a1@b2"),
            vec![
                (Category::Identifier, "a1".to_string()),
                (Category::Unknown, "@b2".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_formula() {
        let cats: Vec<_> = shape(r#"if(a1>=2;"yes";not b2)"#)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(
            cats,
            vec![
                Category::Function,
                Category::LeftParen,
                Category::Identifier,
                Category::RelOperator,
                Category::Number,
                Category::Semicolon,
                Category::String,
                Category::Semicolon,
                Category::UnaryLogicalOperator,
                Category::Whitespace,
                Category::Identifier,
                Category::RightParen,
            ]
        );
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokens = tokenizer().tokenize("\"é\"=a1");
        assert_eq!(tokens[0].text, "\"é\"");
        assert_eq!(tokens[0].char_len(), 3);
        assert_eq!(tokens[1].start, 3);
        assert_eq!(tokens[2].start, 4);
    }

    #[test]
    fn test_table_without_fallback_still_terminates() {
        let table = RuleTable::new(vec![Rule::new(Category::Number, "[0-9]+").unwrap()]).unwrap();
        let tokens = Tokenizer::new(Arc::new(table)).tokenize("1ü2");
        let got: Vec<_> = tokens.iter().map(|t| (t.category, t.text)).collect();
        assert_eq!(
            got,
            vec![
                (Category::Number, "1"),
                (Category::Unknown, "ü"),
                (Category::Number, "2"),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_tokens_partition_input(input in "\\PC{0,40}") {
            let tokens = tokenizer().tokenize(&input);
            let joined: String = tokens.iter().map(|t| t.text).collect();
            prop_assert_eq!(&joined, &input);
            prop_assert_eq!(tokens.is_empty(), input.is_empty());
        }

        #[test]
        fn prop_tokens_are_contiguous(input in "[a-z0-9 +\\-*/=<>!;()\"@.]{0,40}") {
            let tokens = tokenizer().tokenize(&input);
            let mut expected = 0;
            for token in &tokens {
                prop_assert!(!token.text.is_empty());
                prop_assert_eq!(token.start, expected);
                expected = token.end();
            }
            prop_assert_eq!(expected, input.chars().count());
        }
    }
}
