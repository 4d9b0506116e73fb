//! `SrxDocument`: the owning container for language maps, the compiled-regex
//! cache, and the rule-manager cache.
//!
//! A document is built once (by [`crate::srx_xml`]) and then shared,
//! read-only, across however many segmentation runs use it. The two caches
//! are the only mutable state; both are read-mostly after warmup, so they're
//! guarded with a plain `RwLock` rather than anything fancier.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::engine::rule_manager::RuleManager;
use crate::error::Error;
use crate::model::{LanguageMap, LanguageRule, Rule};

/// Key for the rule-manager cache: identity of the language-rule-list plus
/// the lookbehind bound it was built with. Rule lists are always looked up
/// through `Arc<LanguageRule>`, so pointer identity is stable and cheap.
type RuleManagerKey = (Vec<usize>, usize);

/// An SRX document: an ordered list of language maps plus the `cascade` flag
/// that controls whether language lookup returns one or all matching rules.
pub struct SrxDocument {
    pub cascade: bool,
    language_map_list: Vec<LanguageMap>,
    regex_cache: RwLock<HashMap<String, Arc<fancy_regex::Regex>>>,
    rule_manager_cache: RwLock<HashMap<RuleManagerKey, Arc<RuleManager>>>,
}

impl Default for SrxDocument {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SrxDocument {
    pub fn new(cascade: bool) -> Self {
        SrxDocument {
            cascade,
            language_map_list: Vec::new(),
            regex_cache: RwLock::new(HashMap::new()),
            rule_manager_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Add a language map. `pattern` is compiled immediately so load-time
    /// errors surface at load time rather than on first use.
    pub fn add_language_map(&mut self, pattern: &str, language_rule: Arc<LanguageRule>) -> Result<(), Error> {
        let compiled = self.compile(pattern)?;
        self.language_map_list.push(LanguageMap { language_pattern: compiled, language_rule });
        Ok(())
    }

    /// Compile `source`, memoizing on the source text. The same source always
    /// yields an equivalent (and, after the first call, identical `Arc`)
    /// compiled regex.
    pub fn compile(&self, source: &str) -> Result<Arc<fancy_regex::Regex>, Error> {
        if let Some(hit) = self.regex_cache.read().unwrap().get(source) {
            return Ok(hit.clone());
        }

        let mut cache = self.regex_cache.write().unwrap();
        // Re-check: another thread may have compiled this while we waited for
        // the write lock.
        if let Some(hit) = cache.get(source) {
            return Ok(hit.clone());
        }

        let compiled = Arc::new(fancy_regex::Regex::new(source).map_err(|e| Error::regex_compile(source, e))?);
        cache.insert(source.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Matching language rules for `language_code`, in insertion order.
    ///
    /// With `cascade` true, every language map whose pattern fully matches
    /// `language_code` contributes its rule. With `cascade` false, only the
    /// first match is returned.
    pub fn language_rule_list(&self, language_code: &str) -> Vec<Arc<LanguageRule>> {
        let mut out = Vec::new();
        for language_map in &self.language_map_list {
            if language_map.matches(language_code) {
                out.push(language_map.language_rule.clone());
                if !self.cascade {
                    break;
                }
            }
        }
        out
    }

    /// The rule manager for `language_rule_list` and lookbehind bound
    /// `max_lookbehind_construct_length`, built once and cached thereafter.
    pub fn rule_manager(
        &self,
        language_rule_list: &[Arc<LanguageRule>],
        max_lookbehind_construct_length: usize,
    ) -> Result<Arc<RuleManager>, Error> {
        let key: RuleManagerKey = (
            language_rule_list.iter().map(|lr| Arc::as_ptr(lr) as usize).collect(),
            max_lookbehind_construct_length,
        );

        if let Some(hit) = self.rule_manager_cache.read().unwrap().get(&key) {
            return Ok(hit.clone());
        }

        let manager = Arc::new(RuleManager::new(self, language_rule_list, max_lookbehind_construct_length)?);

        let mut cache = self.rule_manager_cache.write().unwrap();
        let entry = cache.entry(key).or_insert(manager);
        Ok(entry.clone())
    }
}

#[allow(dead_code)]
fn _assert_rule_immutable(_: &Rule) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LanguageRule;

    #[test]
    fn cascade_on_returns_all_matches_in_order() {
        let mut doc = SrxDocument::new(true);
        let a = Arc::new(LanguageRule::new("a"));
        let b = Arc::new(LanguageRule::new("b"));
        doc.add_language_map("en.*", a.clone()).unwrap();
        doc.add_language_map(".*", b.clone()).unwrap();

        let matches = doc.language_rule_list("en_US");
        assert_eq!(matches.len(), 2);
        assert!(Arc::ptr_eq(&matches[0], &a));
        assert!(Arc::ptr_eq(&matches[1], &b));
    }

    #[test]
    fn cascade_off_returns_first_match_only() {
        let mut doc = SrxDocument::new(false);
        let a = Arc::new(LanguageRule::new("a"));
        let b = Arc::new(LanguageRule::new("b"));
        doc.add_language_map("en.*", a.clone()).unwrap();
        doc.add_language_map(".*", b).unwrap();

        let matches = doc.language_rule_list("en_US");
        assert_eq!(matches.len(), 1);
        assert!(Arc::ptr_eq(&matches[0], &a));
    }

    #[test]
    fn no_match_returns_empty() {
        let doc = SrxDocument::new(true);
        assert!(doc.language_rule_list("xx").is_empty());
    }

    #[test]
    fn compile_cache_returns_equivalent_regex() {
        let doc = SrxDocument::new(true);
        let a = doc.compile(r"\d+").unwrap();
        let b = doc.compile(r"\d+").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalid_language_pattern_is_an_error() {
        let mut doc = SrxDocument::new(true);
        let lr = Arc::new(LanguageRule::new("a"));
        assert!(doc.add_language_map("(", lr).is_err());
    }
}
