//! Owns the character buffer segmentation runs over, hiding the difference
//! between a fully materialized string and a refillable window backed by a
//! reader.
//!
//! The streaming mode keeps a trailing lookahead character so
//! [`TextManager::has_more_text`] can answer "is there anything past this
//! window?" without needing EOF-probing semantics from the reader itself.

use std::io::Read;

use crate::error::Error;

pub struct TextManager {
    text: String,
    buffer_length: usize,
    next_character: String,
    reader: Option<Box<dyn Read>>,
    initialized: bool,
}

impl TextManager {
    /// A fixed string, fully available up front. `read_text` is never valid
    /// in this mode.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let buffer_length = text.chars().count();
        TextManager { text, buffer_length, next_character: String::new(), reader: None, initialized: true }
    }

    /// A refillable window of `buffer_length` characters, read lazily from
    /// `reader` on first access.
    pub fn from_reader(reader: Box<dyn Read>, buffer_length: usize) -> Self {
        TextManager { text: String::new(), buffer_length, next_character: String::new(), reader: Some(reader), initialized: false }
    }

    /// The current buffer contents.
    pub fn text(&mut self) -> Result<&str, Error> {
        self.init_text()?;
        Ok(&self.text)
    }

    /// True iff there is at least one character past the current buffer.
    pub fn has_more_text(&mut self) -> Result<bool, Error> {
        self.init_text()?;
        Ok(!self.next_character.is_empty())
    }

    /// Drop the first `amount` characters of the buffer and refill up to
    /// `amount` characters at the end. `amount` must be in `1..=buffer_length`
    /// and `has_more_text()` must be true.
    pub fn read_text(&mut self, amount: usize) -> Result<(), Error> {
        self.init_text()?;
        debug_assert!(amount > 0 && amount <= self.buffer_length);
        debug_assert!(!self.next_character.is_empty());

        let keep_from = self.text.char_indices().nth(amount).map(|(i, _)| i).unwrap_or(self.text.len());

        let mut new_text = String::with_capacity(self.text.len() - keep_from + 1 + amount);
        new_text.push_str(&self.text[keep_from..]);
        new_text.push_str(&self.next_character);
        new_text.push_str(&self.read(amount)?);

        self.text = new_text;
        Ok(())
    }

    fn init_text(&mut self) -> Result<(), Error> {
        if !self.initialized {
            self.initialized = true;
            self.text = self.read(self.buffer_length + 1)?;
        }
        Ok(())
    }

    /// Read up to `amount` characters, stashing the last one read as the new
    /// lookahead character if exactly `amount` were available.
    fn read(&mut self, amount: usize) -> Result<String, Error> {
        let reader = self.reader.as_mut().expect("read() is only reachable in streaming mode");
        let result = read_chars(reader.as_mut(), amount)?;

        if result.chars().count() == amount {
            let mut chars: Vec<char> = result.chars().collect();
            let last = chars.pop().expect("amount > 0 checked by callers");
            self.next_character = last.to_string();
            Ok(chars.into_iter().collect())
        } else {
            self.next_character.clear();
            Ok(result)
        }
    }
}

/// Read exactly `amount` characters (fewer at EOF) from a byte-oriented
/// reader, decoding UTF-8 one codepoint at a time.
fn read_chars(reader: &mut dyn Read, amount: usize) -> Result<String, Error> {
    let mut out = String::new();
    let mut lead = [0u8; 1];

    while out.chars().count() < amount {
        if reader.read(&mut lead)? == 0 {
            break;
        }

        let len = utf8_sequence_len(lead[0]);
        let mut bytes = [0u8; 4];
        bytes[0] = lead[0];
        if len > 1 {
            reader.read_exact(&mut bytes[1..len])?;
        }

        let ch = std::str::from_utf8(&bytes[..len])
            .map_err(|e| Error::Reader(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        out.push_str(ch);
    }

    Ok(out)
}

fn utf8_sequence_len(lead_byte: u8) -> usize {
    if lead_byte & 0x80 == 0 {
        1
    } else if lead_byte & 0xE0 == 0xC0 {
        2
    } else if lead_byte & 0xF0 == 0xE0 {
        3
    } else if lead_byte & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}
