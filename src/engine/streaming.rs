//! Streaming segmentation: input larger than memory, bounded lookbehind.
//!
//! Only break rules get a matcher; non-break rules are consulted through the
//! [`RuleManager`]'s precomputed combined exception pattern instead of their
//! own matchers (see module doc on `rule_manager`). A window/margin scheme
//! keeps lookbehind bounded: candidate breaks in the last `margin` characters
//! of the window are treated as possibly an artifact of the window edge and
//! trigger a buffer slide rather than a commit.
//!
//! Buffer/margin comparisons here are done in bytes rather than characters:
//! `TextManager::buffer_length` counts characters, but break positions come
//! back from `fancy-regex` as byte offsets, and the margin only needs to be
//! "comfortably larger than the longest match", not exact to the character.

use std::sync::Arc;

use super::rule_manager::RuleManager;
use super::rule_matcher::RuleMatcher;
use super::text_manager::TextManager;
use crate::document::SrxDocument;
use crate::error::Error;

pub struct StreamingSegments<'doc> {
    document: &'doc SrxDocument,
    rule_manager: Arc<RuleManager>,
    text_manager: TextManager,
    window: usize,
    margin: usize,
    start_position: usize,
    matchers: Vec<RuleMatcher>,
    initialized: bool,
}

impl<'doc> StreamingSegments<'doc> {
    pub fn new(
        document: &'doc SrxDocument,
        language_code: &str,
        text_manager: TextManager,
        window: usize,
        margin: usize,
        max_lookbehind_construct_length: usize,
    ) -> Result<Self, Error> {
        let language_rule_list = document.language_rule_list(language_code);
        let rule_manager = document.rule_manager(&language_rule_list, max_lookbehind_construct_length)?;

        Ok(StreamingSegments {
            document,
            rule_manager,
            text_manager,
            window,
            margin,
            start_position: 0,
            matchers: Vec::new(),
            initialized: false,
        })
    }

    fn reinit_matchers(&mut self) -> Result<(), Error> {
        let snapshot: Arc<str> = Arc::from(self.text_manager.text()?);

        self.matchers.clear();
        for rule in self.rule_manager.break_rules() {
            self.matchers.push(RuleMatcher::new(self.document, rule.clone(), snapshot.clone(), None)?);
        }

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
        loop {
            if !self.initialized {
                self.initialized = true;
                self.reinit_matchers()?;
            }

            let has_more = self.text_manager.has_more_text()?;
            let window_len = self.text_manager.text()?.len();
            let min_index = self.min_matcher_index();
            let min_break_position = min_index.map(|i| self.matchers[i].break_position());

            let needs_refill = has_more
                && (min_index.is_none() || min_break_position.unwrap() > window_len.saturating_sub(self.margin));

            if needs_refill {
                if self.start_position == 0 {
                    return Err(Error::BufferTooSmall { window: self.window, margin: self.margin });
                }
                self.text_manager.read_text(self.start_position)?;
                self.start_position = 0;
                self.reinit_matchers()?;
                continue;
            }

            if min_index.is_none() {
                let text = self.text_manager.text()?;
                if self.start_position >= text.len() {
                    return Ok(None);
                }
                let segment = text[self.start_position..].to_string();
                self.start_position = text.len();
                return Ok(Some(segment));
            }

            let min_index = min_index.expect("checked above");
            let end_position = self.matchers[min_index].break_position();

            if end_position > self.start_position {
                let rule = self.matchers[min_index].rule.clone();
                let suppressed = match self.rule_manager.exception_pattern_for(&rule) {
                    Some(pattern) => {
                        let text = self.text_manager.text()?;
                        super::region_matcher::looking_at_pos(&pattern, text, end_position)?
                    }
                    None => false,
                };

                if !suppressed {
                    self.cut_matchers(end_position)?;
                    let text = self.text_manager.text()?;
                    let segment = text[self.start_position..end_position].to_string();
                    self.start_position = end_position;
                    self.move_matchers(end_position)?;
                    return Ok(Some(segment));
                }
            }

            self.move_matchers(end_position)?;
        }
    }
}

impl<'doc> Iterator for StreamingSegments<'doc> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
