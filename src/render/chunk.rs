//! Styled chunks
//!
//! One chunk per token. A chunk's visible text is the token text with
//! every whitespace character removed, anywhere in the token, so a
//! string literal `"a b"` displays as `"ab"`. Whitespace tokens therefore
//! always render zero-width, but still hold their position.

use std::sync::Arc;

use tracing::debug;

use super::caret::{CaretAnchor, CaretIndex};
use crate::syntax::{Category, RuleTable, Token};

/// Default prefix for chunk element ids
pub const DEFAULT_ID_PREFIX: &str = "#chunk-";

/// Escape the characters that would open or close markup
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Whitespace as the formula rules see it: Unicode whitespace plus U+FEFF
pub fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

/// Remove every whitespace character
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|&ch| !is_blank(ch)).collect()
}

/// Rendering of one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub category: Category,
    pub style_tag: String,
    /// Unescaped text with whitespace removed
    pub visible: String,
    /// Position in the chunk sequence
    pub position: usize,
}

impl Chunk {
    /// Visible length in characters
    pub fn visible_len(&self) -> usize {
        self.visible.chars().count()
    }

    /// Zero-width chunks render nothing
    pub fn is_zero_width(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible text with `<` and `>` escaped
    pub fn markup(&self) -> String {
        escape_markup(&self.visible)
    }

    /// Span element for this chunk, or nothing if zero-width
    pub fn to_html(&self, id_prefix: &str) -> String {
        if self.is_zero_width() {
            return String::new();
        }
        format!(
            "<span id='{}{}' class='{}'>{}</span>",
            id_prefix,
            self.position,
            self.style_tag,
            self.markup()
        )
    }
}

/// A rendered formula: chunks plus their caret index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedFormula {
    chunks: Vec<Chunk>,
    index: CaretIndex,
}

impl RenderedFormula {
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn caret_index(&self) -> &CaretIndex {
        &self.index
    }

    /// Displayed text: all visible text, concatenated
    pub fn visible_text(&self) -> String {
        self.chunks.iter().map(|c| c.visible.as_str()).collect()
    }

    /// Displayed length in characters
    pub fn visible_len(&self) -> usize {
        self.index.total()
    }

    /// Markup for the whole formula; chunks are joined with no separator
    pub fn to_html(&self, id_prefix: &str) -> String {
        self.chunks.iter().map(|c| c.to_html(id_prefix)).collect()
    }

    /// Flat visible offset of a caret inside this render
    pub fn capture(&self, anchor: CaretAnchor) -> usize {
        self.index.capture(anchor)
    }

    /// Place a flat visible offset inside this render
    pub fn restore(&self, offset: usize) -> Option<CaretAnchor> {
        self.index.restore(offset)
    }
}

/// Turns tokens into chunks, tagging them from the rule table
#[derive(Debug, Clone)]
pub struct Renderer {
    table: Arc<RuleTable>,
}

impl Renderer {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn render(&self, tokens: &[Token<'_>]) -> RenderedFormula {
        let chunks: Vec<Chunk> = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| Chunk {
                category: token.category,
                style_tag: self.table.style_tag(token.category).to_string(),
                visible: strip_whitespace(token.text),
                position,
            })
            .collect();
        let index = CaretIndex::from_lengths(chunks.iter().map(Chunk::visible_len));

        debug!(target: "formula.render", chunks = chunks.len(), visible = index.total(), "rendered");
        RenderedFormula { chunks, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{formula_table, Tokenizer};

    fn render(text: &str) -> RenderedFormula {
        let table = Arc::new(formula_table().unwrap());
        let tokens = Tokenizer::new(table.clone()).tokenize(text);
        Renderer::new(table).render(&tokens)
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a<=b>c"), "a&lt;=b&gt;c");
        assert_eq!(escape_markup("&"), "&");
    }

    #[test]
    fn test_strip_whitespace_everywhere() {
        assert_eq!(strip_whitespace(" a \t b\u{a0}c "), "abc");
    }

    #[test]
    fn test_byte_order_mark_elided() {
        assert_eq!(strip_whitespace("a\u{feff}b"), "ab");

        let rendered = render("a1\u{feff}+b2");
        let categories: Vec<_> = rendered.chunks().iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Identifier,
                Category::Whitespace,
                Category::ArithmeticOperator,
                Category::Identifier,
            ]
        );
        assert_eq!(rendered.visible_text(), "a1+b2");
    }

    #[test]
    fn test_whitespace_elided_from_display() {
        let rendered = render("a1 + b2");
        assert_eq!(rendered.visible_text(), "a1+b2");
        assert_eq!(rendered.visible_len(), 5);
        assert_eq!(rendered.chunks().len(), 5);
        assert!(rendered.chunks()[1].is_zero_width());
        assert!(rendered.chunks()[3].is_zero_width());
    }

    #[test]
    fn test_string_literal_loses_inner_spaces() {
        let rendered = render(r#""a b""#);
        assert_eq!(rendered.chunks()[0].visible, r#""ab""#);
        assert_eq!(rendered.chunks()[0].category, Category::String);
    }

    #[test]
    fn test_html_output() {
        let rendered = render("a1 <b2");
        assert_eq!(
            rendered.to_html(DEFAULT_ID_PREFIX),
            "<span id='#chunk-0' class='id-class'>a1</span>\
             <span id='#chunk-2' class='rel-class'>&lt;</span>\
             <span id='#chunk-3' class='id-class'>b2</span>"
        );
    }

    #[test]
    fn test_zero_width_chunk_has_no_html() {
        let rendered = render(" ");
        assert_eq!(rendered.chunks().len(), 1);
        assert_eq!(rendered.chunks()[0].style_tag, "ws-class");
        assert_eq!(rendered.to_html("c"), "");
    }

    #[test]
    fn test_markup_does_not_change_visible_length() {
        let rendered = render("a1<b2");
        assert_eq!(rendered.visible_len(), 5);
        assert_eq!(rendered.chunks()[1].markup(), "&lt;");
    }

    #[test]
    fn test_boundary_restore() {
        let rendered = render("x1=5");
        assert_eq!(rendered.visible_text(), "x1=5");
        // Offset 3 sits between "=" and "5"; the earlier chunk takes it
        assert_eq!(rendered.restore(3), Some(CaretAnchor::new(1, 1)));
        assert_eq!(rendered.chunks()[2].category, Category::Number);
        assert_eq!(rendered.caret_index().chunk_start(2), Some(3));
    }

    #[test]
    fn test_round_trip_with_whitespace() {
        let rendered = render("if (a1 > 2; \"x\"; b3)");
        for k in 0..=rendered.visible_len() {
            let anchor = rendered.restore(k).unwrap();
            assert!(!rendered.chunks()[anchor.chunk].is_zero_width());
            assert_eq!(rendered.capture(anchor), k);
        }
    }

    #[test]
    fn test_empty_formula() {
        let rendered = render("");
        assert!(rendered.chunks().is_empty());
        assert_eq!(rendered.restore(3), None);
        assert_eq!(rendered.to_html(DEFAULT_ID_PREFIX), "");
    }
}
