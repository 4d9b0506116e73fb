//! A rule-based text segmentation engine driven by SRX 2.0 rulesets.
//!
//! Given a loaded [`SrxDocument`] and a language code, a [`Segmenter`] splits
//! input text into segments (typically sentences) whose concatenation, in
//! order, reconstructs the input exactly. Two iterator variants are
//! available: [`engine::AccurateSegments`] holds the whole input in memory
//! and runs a matcher for every rule; [`engine::StreamingSegments`] runs over
//! a bounded window for input larger than memory, using only break-rule
//! matchers plus a precomputed exception pattern per break rule.
//!
//! ```no_run
//! use srx_seg::{SrxDocument, Segmenter};
//!
//! let xml = std::fs::read_to_string("ruleset.srx").unwrap();
//! let document = srx_seg::srx_xml::from_xml_str(&xml).unwrap();
//! let segments = Segmenter::new(&document, "en").segment_str("One. Two.").unwrap();
//! assert_eq!(segments, vec!["One.", " Two."]);
//! ```

pub mod api;
pub mod document;
pub mod engine;
pub mod error;
pub mod finitize;
pub mod model;
pub mod srx_xml;

pub use api::Segmenter;
pub use document::SrxDocument;
pub use error::Error;
pub use model::{LanguageMap, LanguageRule, Rule};
