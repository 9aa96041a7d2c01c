//! Terminal painting using crossterm
//!
//! Paints a rendered formula the way a styled editor would show it:
//! one coloured run per visible chunk, whitespace already elided.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::render::{CaretAnchor, RenderedFormula};
use crate::syntax::{Color, Style};

/// Map a palette color to crossterm
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}

/// Display column of a caret: width of the visible text before it
pub fn caret_column(rendered: &RenderedFormula, anchor: CaretAnchor) -> usize {
    let offset = rendered.capture(anchor);
    let before: String = rendered.visible_text().chars().take(offset).collect();
    before.width()
}

/// Writes rendered formulas to a terminal (or any writer)
pub struct Painter<W: Write> {
    out: W,
    /// Whether to emit colour and attribute sequences
    color: bool,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_style(&mut self, style: Style) -> Result<()> {
        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }

    /// Paint every visible chunk, then end the line
    pub fn paint(&mut self, rendered: &RenderedFormula) -> Result<()> {
        for chunk in rendered.chunks().iter().filter(|c| !c.is_zero_width()) {
            let style = chunk.category.default_style();
            if self.color && !style.is_default() {
                self.set_style(style)?;
                queue!(self.out, Print(&chunk.visible), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(self.out, Print(&chunk.visible))?;
            }
        }
        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    /// Paint a `^` marker under the caret
    pub fn paint_caret(&mut self, rendered: &RenderedFormula, anchor: CaretAnchor) -> Result<()> {
        let column = caret_column(rendered, anchor);
        queue!(self.out, Print(" ".repeat(column)), Print("^\n"))?;
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::Highlighter;

    fn painted(text: &str, color: bool, caret: Option<usize>) -> String {
        let rendered = Highlighter::new().unwrap().render(text);
        let mut painter = Painter::new(Vec::new(), color);
        painter.paint(&rendered).unwrap();
        if let Some(anchor) = caret.and_then(|k| rendered.restore(k)) {
            painter.paint_caret(&rendered, anchor).unwrap();
        }
        painter.flush().unwrap();
        String::from_utf8(painter.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_paint_elides_whitespace() {
        assert_eq!(painted("a1 + b2", false, None), "a1+b2\n");
    }

    #[test]
    fn test_caret_marker() {
        assert_eq!(painted("x1 = 5", false, Some(3)), "x1=5\n   ^\n");
    }

    #[test]
    fn test_color_paint_emits_escapes() {
        let out = painted("if", true, None);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("if"));
    }

    #[test]
    fn test_caret_column_uses_display_width() {
        let rendered = Highlighter::new().unwrap().render("\"日本\"=a1");
        let anchor = rendered.restore(4).unwrap();
        // Quote, two wide characters, quote
        assert_eq!(caret_column(&rendered, anchor), 6);
    }
}
