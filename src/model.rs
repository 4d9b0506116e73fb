//! Immutable rule data.
//!
//! These types are built once by the SRX loader ([`crate::srx_xml`]) and never
//! mutated afterward. Everything downstream (rule managers, matchers,
//! iterators) holds shared references into this graph rather than copies.

use std::sync::Arc;

/// A single SRX rule: a break/exception flag plus the two regex sources that
/// must straddle the candidate break position.
///
/// Either pattern may be the empty string, which matches the empty position
/// (i.e. always "matches" with zero width).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub is_break: bool,
    pub before_pattern: String,
    pub after_pattern: String,
}

impl Rule {
    pub fn new(is_break: bool, before_pattern: impl Into<String>, after_pattern: impl Into<String>) -> Self {
        Rule { is_break, before_pattern: before_pattern.into(), after_pattern: after_pattern.into() }
    }
}

/// A named, ordered sequence of [`Rule`]s.
///
/// Order is significant: within a language rule, non-break rules preceding a
/// break rule (in this order) act as exceptions to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRule {
    pub name: String,
    pub rules: Vec<Arc<Rule>>,
}

impl LanguageRule {
    pub fn new(name: impl Into<String>) -> Self {
        LanguageRule { name: name.into(), rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(Arc::new(rule));
    }
}

/// A mapping between a language-code pattern and the [`LanguageRule`] that
/// applies to codes matching it.
#[derive(Debug, Clone)]
pub struct LanguageMap {
    pub language_pattern: Arc<fancy_regex::Regex>,
    pub language_rule: Arc<LanguageRule>,
}

impl LanguageMap {
    /// True iff `pattern` fully matches `language_code` (not merely a prefix).
    pub fn matches(&self, language_code: &str) -> bool {
        match self.language_pattern.find(language_code) {
            Ok(Some(m)) => m.start() == 0 && m.end() == language_code.len(),
            _ => false,
        }
    }
}
