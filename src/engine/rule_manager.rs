//! Precomputes, for a given language-rule list and lookbehind bound, the
//! ordered list of break rules and each one's combined exception pattern.
//!
//! The construction walks all rules in document order maintaining a single
//! accumulating exception expression. Each non-break rule appends an atom to
//! it; each break rule is bound to whatever the accumulator holds *at that
//! point* — the accumulator itself is never reset, so later break rules see
//! the exceptions of every non-break rule that came before them, even across
//! language rules (this is what makes cascade composition work: see
//! `SrxDocument::rule_manager`).

use std::collections::HashMap;
use std::sync::Arc;

use crate::document::SrxDocument;
use crate::error::Error;
use crate::finitize::finitize;
use crate::model::{LanguageRule, Rule};

fn rule_key(rule: &Arc<Rule>) -> usize {
    Arc::as_ptr(rule) as usize
}

pub struct RuleManager {
    max_lookbehind_construct_length: usize,
    break_rule_list: Vec<Arc<Rule>>,
    exception_pattern_map: HashMap<usize, Option<Arc<fancy_regex::Regex>>>,
}

impl RuleManager {
    pub fn new(
        document: &SrxDocument,
        language_rule_list: &[Arc<LanguageRule>],
        max_lookbehind_construct_length: usize,
    ) -> Result<Self, Error> {
        let mut break_rule_list = Vec::new();
        let mut exception_pattern_map = HashMap::new();
        let mut exception_pattern_builder = String::new();

        for language_rule in language_rule_list {
            for rule in &language_rule.rules {
                if rule.is_break {
                    break_rule_list.push(rule.clone());

                    let exception_pattern = if exception_pattern_builder.is_empty() {
                        None
                    } else {
                        Some(document.compile(&exception_pattern_builder)?)
                    };

                    exception_pattern_map.insert(rule_key(rule), exception_pattern);
                } else {
                    if !exception_pattern_builder.is_empty() {
                        exception_pattern_builder.push('|');
                    }
                    exception_pattern_builder
                        .push_str(&exception_pattern_atom(rule, max_lookbehind_construct_length));
                }
            }
        }

        Ok(RuleManager { max_lookbehind_construct_length, break_rule_list, exception_pattern_map })
    }

    /// The exception pattern bound to `break_rule`, or `None` if no non-break
    /// rule preceded it (meaning: no exceptions, always break).
    pub fn exception_pattern_for(&self, break_rule: &Arc<Rule>) -> Option<Arc<fancy_regex::Regex>> {
        self.exception_pattern_map.get(&rule_key(break_rule)).cloned().flatten()
    }

    /// Break rules in document order.
    pub fn break_rules(&self) -> &[Arc<Rule>] {
        &self.break_rule_list
    }

    pub fn max_lookbehind_construct_length(&self) -> usize {
        self.max_lookbehind_construct_length
    }
}

/// Build the `(?:(?<=before)(?=after))` atom for one non-break rule. `before`
/// is finitized since it is about to sit inside a lookbehind; `after` is
/// used as-is.
fn exception_pattern_atom(rule: &Rule, max_lookbehind_construct_length: usize) -> String {
    let before_pattern = finitize(&rule.before_pattern, max_lookbehind_construct_length);
    let after_pattern = &rule.after_pattern;

    let mut atom = String::from("(?:");
    if !before_pattern.is_empty() {
        atom.push_str("(?<=");
        atom.push_str(&before_pattern);
        atom.push(')');
    }
    if !after_pattern.is_empty() {
        atom.push_str("(?=");
        atom.push_str(after_pattern);
        atom.push(')');
    }
    atom.push(')');
    atom
}
