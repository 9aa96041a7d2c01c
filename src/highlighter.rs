//! Formula highlighter
//!
//! Ties the rule table, tokenizer and renderer together into the
//! handler a host runs on every edit: capture the caret, re-render,
//! put the caret back. Nothing is kept between calls.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::render::{CaretAnchor, CaretIndex, RenderedFormula, Renderer};
use crate::syntax::{formula_table, RuleTable, Token, Tokenizer};

/// Outcome of one edit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
    /// The new render, replacing the previous one wholesale
    pub rendered: RenderedFormula,
    /// Visible offset captured before re-rendering
    pub offset: usize,
    /// Where the caret goes in the new render (`None` if nothing is visible)
    pub caret: Option<CaretAnchor>,
}

/// Highlighting pipeline over one immutable rule table
#[derive(Debug, Clone)]
pub struct Highlighter {
    tokenizer: Tokenizer,
    renderer: Renderer,
}

impl Highlighter {
    /// Create a highlighter with the built-in formula rules
    pub fn new() -> Result<Self> {
        Ok(Self::with_table(Arc::new(formula_table()?)))
    }

    /// Create a highlighter over a given rule table
    pub fn with_table(table: Arc<RuleTable>) -> Self {
        Self {
            tokenizer: Tokenizer::new(table.clone()),
            renderer: Renderer::new(table),
        }
    }

    pub fn table(&self) -> &RuleTable {
        self.tokenizer.table()
    }

    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        self.tokenizer.tokenize(text)
    }

    pub fn render(&self, text: &str) -> RenderedFormula {
        self.renderer.render(&self.tokenize(text))
    }

    /// Handle an edit: `text` is the raw editor content, `current` the
    /// chunk layout the host's caret sits in, `anchor` the caret itself
    pub fn reformat(&self, text: &str, current: &CaretIndex, anchor: CaretAnchor) -> Reformatted {
        let offset = current.capture(anchor);
        let rendered = self.render(text);
        let caret = rendered.restore(offset);
        debug!(offset, ?caret, "reformatted");
        Reformatted {
            rendered,
            offset,
            caret,
        }
    }
}
