//! Error types surfaced by the segmentation engine.
//!
//! Every fallible operation in this crate returns a [`Error`] variant rather
//! than panicking. The variants below correspond to the places things can go
//! wrong: loading a ruleset, compiling or matching a rule's regex, running
//! out of buffer in streaming mode, and the underlying reader failing.

/// Errors produced while loading a ruleset or running a segmentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SRX document failed to parse or violated a structural expectation
    /// (missing attribute, malformed XML, unknown element).
    #[error("invalid ruleset: {0}")]
    RulesetInvalid(String),

    /// A rule's `before` or `after` pattern did not compile.
    #[error("failed to compile pattern {pattern:?}: {source}")]
    RegexCompile {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// The streaming iterator could not make progress because a candidate
    /// break lies beyond the current window and no prior commit exists.
    #[error("buffer too small: window={window} margin={margin}")]
    BufferTooSmall { window: usize, margin: usize },

    /// The underlying character stream failed to read.
    #[error("reader error: {0}")]
    Reader(#[from] std::io::Error),

    /// A compiled pattern failed during matching rather than at compile time
    /// (for example a backtracking budget was exceeded).
    #[error("regex match error: {0}")]
    RegexMatch(#[from] fancy_regex::Error),
}

impl Error {
    pub(crate) fn regex_compile(pattern: &str, source: fancy_regex::Error) -> Self {
        Error::RegexCompile { pattern: pattern.to_string(), source }
    }
}
