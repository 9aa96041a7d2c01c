//! Built-in rule tables

mod formula;

pub use formula::{formula_rules, formula_table};
