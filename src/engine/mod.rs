//! The segmentation engine.
//!
//! This module is the *public entry point* for the rule-matching and
//! scheduling machinery behind [`crate::api::Segmenter`].
//!
//! ## How the parts work together
//!
//! ```text
//! SrxDocument ── language_rule_list(code) ──┐
//!                                           │
//!               RuleManager::new ───────────┼── break rules + combined
//!               (rule_manager.rs)           │   exception patterns
//!                                           v
//!                              StreamingSegments / AccurateSegments
//!                                (streaming.rs)   (accurate.rs)
//!                                           │
//!                      RuleMatcher (rule_matcher.rs)
//!                       - one per live rule
//!                       - wraps a before- and after-RegionMatcher
//!                                           │
//!                         RegionMatcher (region_matcher.rs)
//!                          - forward search / looking-at over the buffer
//! ```
//!
//! Both iterator variants share the same priority discipline: the matcher
//! with the smallest break position wins, ties go to document order, and an
//! exception rule (or, in streaming mode, the precompiled combined exception
//! pattern) can veto a tentative break.
//!
//! ## Responsibilities by module
//!
//! - `region_matcher.rs`: a single forward-searching regex cursor over a
//!   shared text buffer.
//! - `rule_matcher.rs`: pairs a before- and after-`RegionMatcher` to find the
//!   next position where one rule's pattern pair straddles a candidate break.
//! - `rule_manager.rs`: precomputes break rules and combined exception
//!   patterns for a language-rule list.
//! - `text_manager.rs`: the character buffer, in both fixed-string and
//!   refillable-window modes.
//! - `accurate.rs`: the in-memory iterator, one matcher per rule.
//! - `streaming.rs`: the windowed iterator, matchers only for break rules.
//! - `metrics.rs`: optional timing data for a segmentation run.

pub mod accurate;
pub(crate) mod region_matcher;
pub mod rule_manager;
pub(crate) mod rule_matcher;
pub mod streaming;
pub mod text_manager;

pub mod metrics;

pub use accurate::AccurateSegments;
pub use rule_manager::RuleManager;
pub use streaming::StreamingSegments;
pub use text_manager::TextManager;
