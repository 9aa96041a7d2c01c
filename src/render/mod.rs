//! Rendering and caret translation
//!
//! Tokens become styled chunks; carets move between a flat visible
//! offset and a (chunk, offset) anchor inside those chunks.

mod caret;
mod chunk;

pub use caret::{CaretAnchor, CaretIndex};
pub use chunk::{escape_markup, is_blank, strip_whitespace, Chunk, RenderedFormula, Renderer, DEFAULT_ID_PREFIX};
