//! Public entry points for running a segmentation.
//!
//! [`Segmenter`] is the main thing to reach for: build one against a
//! [`SrxDocument`] and a language code, then either collect the whole
//! output with [`Segmenter::segment_str`] or drive
//! [`Segmenter::accurate`]/[`Segmenter::streaming`] directly as lazy
//! iterators.

use std::io::Read;
use std::sync::Arc;

use crate::document::SrxDocument;
use crate::engine::accurate::AccurateSegments;
use crate::engine::streaming::StreamingSegments;
use crate::engine::text_manager::TextManager;
use crate::error::Error;

/// Default bound used to finitize lookbehind constructs (`N` in
/// `finitize(pattern, N)`), matching the reference tooling's default.
pub const DEFAULT_MAX_LOOKBEHIND: usize = 100;

/// Default streaming window, in characters.
pub const DEFAULT_WINDOW: usize = 1024 * 1024;

/// Default streaming margin, in characters.
pub const DEFAULT_MARGIN: usize = 128;

/// Builds segmentation runs against a document for a fixed language code.
#[derive(Clone)]
pub struct Segmenter<'doc> {
    document: &'doc SrxDocument,
    language_code: String,
    max_lookbehind_construct_length: usize,
}

impl<'doc> Segmenter<'doc> {
    pub fn new(document: &'doc SrxDocument, language_code: impl Into<String>) -> Self {
        Segmenter {
            document,
            language_code: language_code.into(),
            max_lookbehind_construct_length: DEFAULT_MAX_LOOKBEHIND,
        }
    }

    /// Override the bound used to finitize lookbehind constructs (default
    /// [`DEFAULT_MAX_LOOKBEHIND`]).
    pub fn max_lookbehind(mut self, max_lookbehind_construct_length: usize) -> Self {
        self.max_lookbehind_construct_length = max_lookbehind_construct_length;
        self
    }

    /// The in-memory iterator: every rule gets a live matcher. Use for
    /// inputs that comfortably fit in memory.
    pub fn accurate(&self, text: impl Into<Arc<str>>) -> Result<AccurateSegments, Error> {
        AccurateSegments::new(self.document, &self.language_code, text, self.max_lookbehind_construct_length)
    }

    /// Collects [`Segmenter::accurate`] into a `Vec<String>`.
    pub fn segment_str(&self, text: &str) -> Result<Vec<String>, Error> {
        self.accurate(Arc::from(text))?.collect()
    }

    /// The windowed iterator, reading from `reader` and holding at most
    /// `window` characters in memory at a time. Candidate breaks within the
    /// trailing `margin` characters of the window are treated as possibly an
    /// artifact of the window edge and trigger a slide instead of a commit.
    pub fn streaming(
        &self,
        reader: Box<dyn Read>,
        window: usize,
        margin: usize,
    ) -> Result<StreamingSegments<'doc>, Error> {
        let text_manager = TextManager::from_reader(reader, window);
        StreamingSegments::new(
            self.document,
            &self.language_code,
            text_manager,
            window,
            margin,
            self.max_lookbehind_construct_length,
        )
    }

    /// Like [`Segmenter::streaming`], but over an already-materialized
    /// string. Mostly useful for testing window-independence against
    /// [`Segmenter::accurate`].
    pub fn streaming_str(&self, text: &str, window: usize, margin: usize) -> Result<StreamingSegments<'doc>, Error> {
        let text_manager = TextManager::from_text(text);
        StreamingSegments::new(
            self.document,
            &self.language_code,
            text_manager,
            window,
            margin,
            self.max_lookbehind_construct_length,
        )
    }
}

/// One-shot convenience wrapper around [`Segmenter::segment_str`].
pub fn segment(document: &SrxDocument, language_code: &str, text: &str) -> Result<Vec<String>, Error> {
    Segmenter::new(document, language_code).segment_str(text)
}
