//! Accurate segmentation: the whole input is held in memory and a matcher
//! runs for every rule, break and non-break alike.
//!
//! This is the most direct reading of the priority discipline (minimum break
//! position wins, ties broken by document order, non-break rules veto a
//! tied break) since every rule gets its own live matcher and the scheduler
//! simply compares their current break positions.

use std::sync::Arc;

use super::rule_matcher::RuleMatcher;
use crate::document::SrxDocument;
use crate::error::Error;

pub struct AccurateSegments {
    text: Arc<str>,
    start_position: usize,
    initialized: bool,
    matchers: Vec<RuleMatcher>,
}

impl AccurateSegments {
    pub fn new(
        document: &SrxDocument,
        language_code: &str,
        text: impl Into<Arc<str>>,
        max_lookbehind_construct_length: usize,
    ) -> Result<Self, Error> {
        let text: Arc<str> = text.into();
        let language_rule_list = document.language_rule_list(language_code);

        let mut matchers = Vec::new();
        for language_rule in &language_rule_list {
            for rule in &language_rule.rules {
                let finitize_before = if rule.is_break { None } else { Some(max_lookbehind_construct_length) };
                matchers.push(RuleMatcher::new(document, rule.clone(), text.clone(), finitize_before)?);
            }
        }

        Ok(AccurateSegments { text, start_position: 0, initialized: false, matchers })
    }

    fn init_matchers(&mut self) -> Result<(), Error> {
        let mut i = 0;
        while i < self.matchers.len() {
            if self.matchers[i].find(None)? {
                i += 1;
            } else {
                self.matchers.remove(i);
            }
        }
        Ok(())
    }

    /// Move matchers that start before the committed break to just past it.
    fn cut_matchers(&mut self, end_position: usize) -> Result<(), Error> {
        let mut i = 0;
        while i < self.matchers.len() {
            if self.matchers[i].start_position() < end_position {
                if self.matchers[i].find(Some(end_position))? {
                    i += 1;
                } else {
                    self.matchers.remove(i);
                }
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    /// Advance every matcher whose break position has been passed.
    fn move_matchers(&mut self, end_position: usize) -> Result<(), Error> {
        let mut i = 0;
        while i < self.matchers.len() {
            let mut exhausted = false;
            while self.matchers[i].break_position() <= end_position {
                if !self.matchers[i].find(None)? {
                    exhausted = true;
                    break;
                }
            }
            if exhausted {
                self.matchers.remove(i);
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    fn min_matcher_index(&self) -> Option<usize> {
        let mut min_position = usize::MAX;
        let mut min_index = None;
        for (i, matcher) in self.matchers.iter().enumerate() {
            let position = matcher.break_position();
            if position < min_position {
                min_position = position;
                min_index = Some(i);
            }
        }
        min_index
    }

    fn advance(&mut self) -> Result<Option<String>, Error> {
        if self.start_position >= self.text.len() {
            return Ok(None);
        }

        if !self.initialized {
            self.initialized = true;
            self.init_matchers()?;
        }

        let mut end_position = self.text.len();
        let mut found = false;

        while !self.matchers.is_empty() && !found {
            let min_index = match self.min_matcher_index() {
                Some(i) => i,
                None => break,
            };

            end_position = self.matchers[min_index].break_position();
            let is_break = self.matchers[min_index].rule.is_break;

            if is_break && end_position > self.start_position {
                found = true;
                self.cut_matchers(end_position)?;
            }

            self.move_matchers(end_position)?;
        }

        if !found {
            end_position = self.text.len();
        }

        let segment = self.text[self.start_position..end_position].to_string();
        self.start_position = end_position;
        Ok(Some(segment))
    }
}

impl Iterator for AccurateSegments {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LanguageRule, Rule};
    use std::sync::Arc as StdArc;

    fn build_document(rules_by_language: Vec<(&str, Vec<Rule>, &str)>) -> SrxDocument {
        let mut doc = SrxDocument::new(true);
        for (lang_name, rules, lang_pattern) in rules_by_language {
            let mut lr = LanguageRule::new(lang_name);
            for r in rules {
                lr.add_rule(r);
            }
            doc.add_language_map(lang_pattern, StdArc::new(lr)).unwrap();
        }
        doc
    }

    #[test]
    fn empty_break_rule_advances_one_char_at_a_time() {
        let doc = build_document(vec![("any", vec![Rule::new(true, "", "")], ".*")]);
        let segs: Vec<String> =
            AccurateSegments::new(&doc, "en", "abc", 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs, vec!["a", "b", "c"]);
    }

    #[test]
    fn break_at_end_of_text() {
        let doc = build_document(vec![("any", vec![Rule::new(true, r"\.", "")], ".*")]);
        let segs: Vec<String> =
            AccurateSegments::new(&doc, "en", "a.", 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs, vec!["a."]);
    }

    #[test]
    fn matching_all_rule_scenario() {
        let doc = build_document(vec![(
            "any",
            vec![Rule::new(true, r"[^\s]*", r"\s"), Rule::new(true, r"\.", r"\s")],
            ".*",
        )]);
        let segs: Vec<String> =
            AccurateSegments::new(&doc, "en", "A B. C ", 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs, vec!["A", " B.", " C", " "]);
    }

    #[test]
    fn specification_example_is_suppressed_by_exceptions() {
        let doc = build_document(vec![(
            "any",
            vec![
                Rule::new(false, r"\sU\.K\.", r"\s"),
                Rule::new(false, r"Mr\.", r"\s"),
                Rule::new(true, r"[\.\?!]+", r"\s"),
            ],
            ".*",
        )]);
        let input = "The U.K. Prime Minister, Mr. Blair, was seen out today.";
        let segs: Vec<String> = AccurateSegments::new(&doc, "en", input, 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs, vec![input.to_string()]);
    }

    #[test]
    fn overlapping_exceptions_scenario() {
        let doc = build_document(vec![(
            "any",
            vec![Rule::new(false, r"n\.", ""), Rule::new(false, r"n\.e\.", ""), Rule::new(true, r"\.", "")],
            ".*",
        )]);
        let input = "W 59 n.e. Julek nie zrobił nic ciekawego. Ja też nie";
        let segs: Vec<String> = AccurateSegments::new(&doc, "en", input, 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs, vec!["W 59 n.e. Julek nie zrobił nic ciekawego.", " Ja też nie"]);
    }

    #[test]
    fn cascade_applies_polish_exception_then_default_break_rules() {
        let doc = build_document(vec![
            ("Polish", vec![Rule::new(false, r"[Pp]rof\.", r"\s")], "pl"),
            ("Default", vec![Rule::new(true, r"\.", r"\s"), Rule::new(true, "", "\n")], ".*"),
        ]);
        let input = "Ala ma kota. Prof. Kot nie wie kim jest. Ech.\nA inny prof. to już w ogole. Uch";
        let segs: Vec<String> = AccurateSegments::new(&doc, "pl", input, 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            segs,
            vec![
                "Ala ma kota.",
                " Prof. Kot nie wie kim jest.",
                " Ech.",
                "\nA inny prof. to już w ogole.",
                " Uch",
            ]
        );
    }

    #[test]
    fn reconstruction_property_holds() {
        let doc = build_document(vec![("any", vec![Rule::new(true, r"\.", r"\s")], ".*")]);
        let input = "One. Two. Three.";
        let segs: Vec<String> =
            AccurateSegments::new(&doc, "en", input, 100).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(segs.concat(), input);
    }
}
