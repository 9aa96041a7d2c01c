//! Token categories for formula highlighting
//!
//! This module defines the lexical categories a formula is split into,
//! their default style tags (the class a markup host styles by) and
//! their default terminal styles.

use super::style::{Color, Style};

/// Lexical categories of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A single whitespace character
    Whitespace,
    /// Cell-like identifiers: one or two letters followed by 1-3 digits
    Identifier,
    /// `+ - * /`
    ArithmeticOperator,
    /// Optionally signed decimal numbers
    Number,
    /// Double-quoted string literals
    String,
    /// `=`
    Equals,
    /// `< <= > >= !=`
    RelOperator,
    /// `and or xor`
    LogicalOperator,
    /// `not`
    UnaryLogicalOperator,
    /// `;`
    Semicolon,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Built-in function names (`if exp log find`)
    Function,
    /// Anything no other rule recognises
    Unknown,
}

impl Category {
    /// All categories, in built-in rule table order
    pub const ALL: [Category; 14] = [
        Category::Whitespace,
        Category::Identifier,
        Category::ArithmeticOperator,
        Category::Number,
        Category::String,
        Category::Equals,
        Category::RelOperator,
        Category::LogicalOperator,
        Category::UnaryLogicalOperator,
        Category::Semicolon,
        Category::LeftParen,
        Category::RightParen,
        Category::Function,
        Category::Unknown,
    ];

    /// Get the default style tag for this category
    pub fn default_style_tag(&self) -> &'static str {
        match self {
            Category::Whitespace => "ws-class",
            Category::Identifier => "id-class",
            Category::ArithmeticOperator => "op-class",
            Category::Number => "num-class",
            Category::String => "str-class",
            Category::Equals => "eq-class",
            Category::RelOperator => "rel-class",
            Category::LogicalOperator => "log-class",
            Category::UnaryLogicalOperator => "log-class",
            Category::Semicolon => "scol-class",
            Category::LeftParen => "par-class",
            Category::RightParen => "par-class",
            Category::Function => "function-class",
            Category::Unknown => "unk-class",
        }
    }

    /// Get the default terminal style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Whitespace => Style::default(),
            Category::Identifier => Style::fg(Color::Cyan),
            Category::ArithmeticOperator => Style::fg(Color::BrightWhite),
            Category::Number => Style::fg(Color::Yellow),
            Category::String => Style::fg(Color::Green),
            Category::Equals => Style::fg(Color::BrightWhite).with_bold(),
            Category::RelOperator => Style::fg(Color::BrightCyan),
            Category::LogicalOperator => Style::fg(Color::Magenta).with_bold(),
            Category::UnaryLogicalOperator => Style::fg(Color::Magenta).with_bold(),
            Category::Semicolon => Style::fg(Color::BrightBlack),
            Category::LeftParen => Style::fg(Color::White),
            Category::RightParen => Style::fg(Color::White),
            Category::Function => Style::fg(Color::Blue).with_bold(),
            Category::Unknown => Style::fg(Color::BrightRed).with_underline(),
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Whitespace => "Whitespace",
            Category::Identifier => "Identifier",
            Category::ArithmeticOperator => "ArithmeticOperator",
            Category::Number => "Number",
            Category::String => "String",
            Category::Equals => "Equals",
            Category::RelOperator => "RelOperator",
            Category::LogicalOperator => "LogicalOperator",
            Category::UnaryLogicalOperator => "UnaryLogicalOperator",
            Category::Semicolon => "Semicolon",
            Category::LeftParen => "LeftParen",
            Category::RightParen => "RightParen",
            Category::Function => "Function",
            Category::Unknown => "Unknown",
        }
    }

    /// Parse a category from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|category| category.name() == name)
    }
}
