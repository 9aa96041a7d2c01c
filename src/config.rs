//! Configuration file support
//!
//! Loads settings from ~/.formula-hl.toml (or %USERPROFILE%\.formula-hl.toml on Windows)
//!
//! Example:
//! ```toml
//! # formula-hl configuration
//! chunk-id-prefix = "#chunk-"
//! color = true
//!
//! [style-tags]
//! Function = "fn-class"
//!
//! # Replaces the built-in table; order is priority
//! [[rules]]
//! category = "Whitespace"
//! pattern = '\s'
//!
//! [[rules]]
//! category = "Unknown"
//! pattern = '(?s).+'
//! style-tag = "bad"
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::render::DEFAULT_ID_PREFIX;
use crate::syntax::{formula_rules, Category, Rule, RuleTable};

/// Configuration file name, looked up in the home directory
pub const CONFIG_FILE_NAME: &str = ".formula-hl.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Prefix for chunk element ids in markup
    #[serde(default = "default_id_prefix")]
    pub chunk_id_prefix: String,
    /// Whether the terminal front end paints colours
    #[serde(default = "default_true")]
    pub color: bool,
    /// Style tag overrides, keyed by category name
    #[serde(default)]
    pub style_tags: HashMap<String, String>,
    /// Replacement rule table; empty means the built-in one
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One rule as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleConfig {
    pub category: String,
    pub pattern: String,
    #[serde(default)]
    pub style_tag: Option<String>,
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_id_prefix: default_id_prefix(),
            color: true,
            style_tags: HashMap::new(),
            rules: Vec::new(),
        }
    }
}

fn category_named(name: &str) -> Result<Category> {
    Category::from_name(name).ok_or_else(|| HighlightError::UnknownCategory(name.to_string()))
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        }
    }

    /// Load configuration from the default location; a missing file means defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the rule table this configuration describes
    pub fn rule_table(&self) -> Result<RuleTable> {
        let rules = if self.rules.is_empty() {
            formula_rules()?
        } else {
            self.rules
                .iter()
                .map(|rule| {
                    let category = category_named(&rule.category)?;
                    let tag = rule.style_tag.as_deref().unwrap_or(category.default_style_tag());
                    Rule::with_tag(category, &rule.pattern, tag)
                })
                .collect::<Result<Vec<_>>>()?
        };

        let mut overrides = HashMap::new();
        for (name, tag) in &self.style_tags {
            overrides.insert(category_named(name)?, tag.as_str());
        }

        let rules = rules
            .into_iter()
            .map(|rule| match overrides.get(&rule.category()) {
                Some(tag) => rule.retagged(tag),
                None => rule,
            })
            .collect();
        RuleTable::new(rules)
    }
}
