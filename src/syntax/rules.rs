//! Lexical rules for formula tokenizing
//!
//! A rule pairs an anchored pattern with a category and a style tag.
//! A `RuleTable` is an ordered, immutable collection of rules: the first
//! rule (in table order) that matches at the cursor wins, whatever the
//! length of the matches later rules would produce.

use regex::{Regex, RegexSet};
use tracing::warn;

use super::tokens::Category;
use crate::error::{HighlightError, Result};

/// Wrap a pattern so it can only match at the start of the haystack
fn anchored(pattern: &str) -> String {
    format!("^(?:{})", pattern)
}

/// A single anchored-prefix rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Category assigned to matches
    category: Category,
    /// Pattern as written, before anchoring
    source: String,
    /// Compiled, anchored pattern
    pattern: Regex,
    /// Style tag handed to the host for matches of this rule
    style_tag: String,
}

impl Rule {
    /// Create a rule using the category's default style tag
    pub fn new(category: Category, pattern: &str) -> Result<Self> {
        Self::with_tag(category, pattern, category.default_style_tag())
    }

    /// Create a rule with an explicit style tag
    pub fn with_tag(category: Category, pattern: &str, style_tag: &str) -> Result<Self> {
        let compiled = Regex::new(&anchored(pattern))
            .map_err(|source| HighlightError::InvalidPattern { category, source })?;
        Ok(Self {
            category,
            source: pattern.to_string(),
            pattern: compiled,
            style_tag: style_tag.to_string(),
        })
    }

    /// Builder: replace the style tag
    pub fn retagged(mut self, style_tag: &str) -> Self {
        self.style_tag = style_tag.to_string();
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn style_tag(&self) -> &str {
        &self.style_tag
    }

    /// Length in bytes of the match at the start of `text`, if any
    ///
    /// The `^` wrapper alone is not enough: a pattern can close the
    /// wrapping group and add an unanchored branch, so matches that do not
    /// start at 0 are dropped here.
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.pattern
            .find(text)
            .filter(|m| m.start() == 0)
            .map(|m| m.end())
    }
}

/// Ordered rule collection with a combined scanner
///
/// Every pattern is also compiled into one `RegexSet`, so a single pass
/// over the remaining text reports all candidate rules. Only candidates
/// are then run individually, lowest index first.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    scanner: RegexSet,
}

impl RuleTable {
    /// Build a table; rule order is match priority
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(HighlightError::EmptyRuleTable);
        }
        let scanner = RegexSet::new(rules.iter().map(|rule| anchored(&rule.source)))
            .map_err(|e| HighlightError::Message(format!("cannot build rule scanner: {}", e)))?;
        Ok(Self { rules, scanner })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the rule for a category (first one, if several share it)
    pub fn rule_for(&self, category: Category) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.category == category)
    }

    /// Style tag for a category, falling back to the category default
    pub fn style_tag(&self, category: Category) -> &str {
        self.rule_for(category)
            .map(Rule::style_tag)
            .unwrap_or_else(|| category.default_style_tag())
    }

    /// First rule in table order with a non-empty match at the start of `text`
    ///
    /// Returns the rule and the match length in bytes. Scanner hits are only
    /// candidates; each is confirmed by `Rule::match_len`. Zero-length
    /// matches never win, so a caller advancing by the returned length
    /// always makes progress.
    pub fn first_match(&self, text: &str) -> Option<(&Rule, usize)> {
        for idx in self.scanner.matches(text).into_iter() {
            let rule = &self.rules[idx];
            match rule.match_len(text) {
                Some(0) => {
                    warn!(category = rule.category.name(), "rule matched empty text, skipping");
                }
                Some(len) => return Some((rule, len)),
                None => {}
            }
        }
        None
    }
}
