//! Finds, for one rule, the next position where `before_pattern` ends and
//! `after_pattern` begins.

use std::sync::Arc;

use super::region_matcher::RegionMatcher;
use crate::document::SrxDocument;
use crate::error::Error;
use crate::finitize::finitize;
use crate::model::Rule;

pub struct RuleMatcher {
    pub rule: Arc<Rule>,
    text: Arc<str>,
    before_matcher: RegionMatcher,
    after_matcher: RegionMatcher,
    found: bool,
}

impl RuleMatcher {
    /// `finitize_before_len`, when set, finitizes `rule.before_pattern`
    /// before compiling it (the accurate iterator does this for non-break
    /// rules; everything else matches the rule's pattern verbatim since it
    /// is never placed inside a lookbehind directly).
    pub fn new(
        document: &SrxDocument,
        rule: Arc<Rule>,
        text: Arc<str>,
        finitize_before_len: Option<usize>,
    ) -> Result<Self, Error> {
        let before_source = match finitize_before_len {
            Some(bound) => finitize(&rule.before_pattern, bound),
            None => rule.before_pattern.clone(),
        };
        let before_pattern = document.compile(&before_source)?;
        let after_pattern = document.compile(&rule.after_pattern)?;

        Ok(RuleMatcher {
            rule,
            text,
            before_matcher: RegionMatcher::new(before_pattern),
            after_matcher: RegionMatcher::new(after_pattern),
            found: true,
        })
    }

    /// Find the next match after the one last found (or starting at `start`
    /// if given). Returns whether a match was found.
    pub fn find(&mut self, start: Option<usize>) -> Result<bool, Error> {
        if let Some(start) = start {
            self.before_matcher.region(start);
        }

        self.found = false;
        while !self.found && self.before_matcher.search(&self.text)? {
            self.after_matcher.region(self.before_matcher.end);
            self.found = self.after_matcher.looking_at(&self.text)?;
        }

        Ok(self.found)
    }

    /// True iff the last `find` failed to locate a match.
    pub fn hit_end(&self) -> bool {
        !self.found
    }

    pub fn start_position(&self) -> usize {
        self.before_matcher.start
    }

    pub fn break_position(&self) -> usize {
        self.after_matcher.start
    }

    pub fn end_position(&self) -> usize {
        self.after_matcher.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rule;

    fn matcher(document: &SrxDocument, is_break: bool, before: &str, after: &str, text: &str) -> RuleMatcher {
        let rule = Arc::new(Rule::new(is_break, before, after));
        RuleMatcher::new(document, rule, Arc::from(text), None).unwrap()
    }

    #[test]
    fn finds_break_position_between_before_and_after() {
        let doc = SrxDocument::new(true);
        let mut m = matcher(&doc, true, r"\.", r"\s", "a. b. c");
        assert!(m.find(None).unwrap());
        assert_eq!((m.start_position(), m.break_position(), m.end_position()), (1, 2, 3));
        assert!(m.find(None).unwrap());
        assert_eq!((m.start_position(), m.break_position(), m.end_position()), (4, 5, 6));
        assert!(!m.find(None).unwrap());
        assert!(m.hit_end());
    }

    #[test]
    fn empty_before_and_after_matches_every_position() {
        let doc = SrxDocument::new(true);
        let mut m = matcher(&doc, true, "", "", "abc");
        assert!(m.find(None).unwrap());
        assert_eq!(m.break_position(), 0);
        assert!(m.find(None).unwrap());
        assert_eq!(m.break_position(), 1);
    }
}
