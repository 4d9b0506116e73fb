//! A single forward-searching regex cursor over a shared text buffer.
//!
//! This is the Rust analogue of the host runtime's `Matcher` + region
//! emulation the original implementation leaned on: a pattern paired with a
//! cursor position, able to search forward for the next match or to check
//! whether the pattern matches exactly at the cursor ("looking at").
//!
//! Because every call here is given the *whole* buffer rather than a slice of
//! it, lookaround always sees the full text regardless of where the cursor
//! currently sits — what the original implementation called "transparent
//! bounds". We don't offer a non-transparent mode: nothing in this crate
//! needs a matcher whose lookaround is blind to the rest of the buffer, and
//! emulating that would mean slicing the buffer and losing exactly the
//! context transparent bounds exists to keep.

use std::sync::Arc;

use crate::error::Error;

/// Cursor over `pattern`, confined to searching at or after `region_start`.
pub struct RegionMatcher {
    pattern: Arc<fancy_regex::Regex>,
    region_start: usize,
    pub start: usize,
    pub end: usize,
}

impl RegionMatcher {
    pub fn new(pattern: Arc<fancy_regex::Regex>) -> Self {
        RegionMatcher { pattern, region_start: 0, start: 0, end: 0 }
    }

    /// Move the cursor to `start`, discarding any pending match state.
    pub fn region(&mut self, start: usize) {
        self.region_start = start;
    }

    /// Find the next match at or after the cursor; advance the cursor past
    /// it (by one codepoint, if the match was zero-width, to guarantee
    /// progress).
    pub fn search(&mut self, text: &str) -> Result<bool, Error> {
        self.find_and_move(text, false)
    }

    /// Check whether `pattern` matches exactly at the cursor position
    /// (not merely somewhere at or after it).
    pub fn looking_at(&mut self, text: &str) -> Result<bool, Error> {
        self.find_and_move(text, true)
    }

    fn find_and_move(&mut self, text: &str, anchored: bool) -> Result<bool, Error> {
        if self.region_start > text.len() {
            return Ok(false);
        }

        let found = self.pattern.find_from_pos(text, self.region_start)?;

        let found = match found {
            Some(m) if !anchored || m.start() == self.region_start => Some(m),
            _ => None,
        };

        match found {
            Some(m) => {
                self.start = m.start();
                self.end = m.end();
                self.region_start = m.end() + zero_width_step(text, m.start(), m.end());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Number of bytes to additionally advance past a match ending at `end` so a
/// zero-width match never stalls the cursor. Stepping by a whole codepoint
/// (rather than a single byte) keeps every subsequent search anchored on a
/// valid UTF-8 boundary.
fn zero_width_step(text: &str, start: usize, end: usize) -> usize {
    if start != end {
        return 0;
    }
    text[end..].chars().next().map(char::len_utf8).unwrap_or(1)
}

/// Stateless check of whether `pattern` matches exactly at byte offset `pos`
/// in `text`, without touching any cursor. Used to test a combined exception
/// pattern against a single candidate break position.
pub(crate) fn looking_at_pos(pattern: &fancy_regex::Regex, text: &str, pos: usize) -> Result<bool, Error> {
    if pos > text.len() {
        return Ok(false);
    }
    match pattern.find_from_pos(text, pos)? {
        Some(m) => Ok(m.start() == pos),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(src: &str) -> RegionMatcher {
        RegionMatcher::new(Arc::new(fancy_regex::Regex::new(src).unwrap()))
    }

    #[test]
    fn search_advances_cursor_past_match() {
        let mut m = matcher(r"\d+");
        assert!(m.search("a12b34").unwrap());
        assert_eq!((m.start, m.end), (1, 3));
        assert!(m.search("a12b34").unwrap());
        assert_eq!((m.start, m.end), (4, 6));
        assert!(!m.search("a12b34").unwrap());
    }

    #[test]
    fn looking_at_requires_exact_cursor_position() {
        let mut m = matcher(r"\d+");
        m.region(1);
        assert!(m.looking_at("a12b").unwrap());
        let mut m = matcher(r"\d+");
        m.region(0);
        assert!(!m.looking_at("a12b").unwrap());
    }

    #[test]
    fn zero_width_match_advances_by_one_codepoint() {
        let mut m = matcher(r"");
        assert!(m.search("äb").unwrap());
        assert_eq!((m.start, m.end), (0, 0));
        assert!(m.search("äb").unwrap());
        // "ä" is 2 bytes in UTF-8; the cursor must have jumped past it, not
        // landed inside it.
        assert_eq!((m.start, m.end), (2, 2));
    }

    #[test]
    fn looking_at_pos_does_not_move_any_cursor() {
        let pattern = fancy_regex::Regex::new(r"(?<=foo)").unwrap();
        assert!(looking_at_pos(&pattern, "foobar", 3).unwrap());
        assert!(!looking_at_pos(&pattern, "foobar", 0).unwrap());
    }
}
