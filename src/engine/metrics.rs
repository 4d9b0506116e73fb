//! Optional timing data for a segmentation run.
//!
//! Collecting these costs an `Instant::now()` per segment plus a counter
//! bump; call [`TimedSegments::new`] instead of driving an iterator directly
//! when that's worth it (profiling, regression hunting). The normal iterator
//! path (`AccurateSegments`, `StreamingSegments`) never pays for this.

use std::time::{Duration, Instant};

use crate::error::Error;

/// Timing summary for a full segmentation run.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total wall-clock time spent producing all segments.
    pub total: Duration,
    /// Number of segments produced.
    pub segment_count: usize,
    /// Number of buffer refills performed (streaming mode only; always 0 for
    /// the accurate iterator).
    pub refill_count: usize,
}

/// Wraps any `Iterator<Item = Result<String, Error>>` and records timing
/// while draining it to completion.
pub struct TimedSegments<I> {
    inner: I,
}

impl<I> TimedSegments<I>
where
    I: Iterator<Item = Result<String, Error>>,
{
    pub fn new(inner: I) -> Self {
        TimedSegments { inner }
    }

    /// Drain the iterator, returning every segment alongside a [`RunMetrics`].
    ///
    /// `refill_count` cannot be observed from outside the iterator (it is
    /// internal to `StreamingSegments`), so it is always reported as 0 here;
    /// callers who need it should count `BufferTooSmall`-adjacent retries
    /// themselves at the call site.
    pub fn run(self) -> Result<(Vec<String>, RunMetrics), Error> {
        let start = Instant::now();
        let mut segments = Vec::new();

        for segment in self.inner {
            segments.push(segment?);
        }

        let metrics = RunMetrics { total: start.elapsed(), segment_count: segments.len(), refill_count: 0 };
        Ok((segments, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SrxDocument;
    use crate::engine::accurate::AccurateSegments;
    use crate::model::{LanguageRule, Rule};
    use std::sync::Arc;

    #[test]
    fn run_collects_segments_and_counts_them() {
        let mut doc = SrxDocument::new(true);
        let mut lr = LanguageRule::new("any");
        lr.add_rule(Rule::new(true, r"\.", r"\s"));
        doc.add_language_map(".*", Arc::new(lr)).unwrap();

        let iter = AccurateSegments::new(&doc, "en", "a. b. c", 100).unwrap();
        let (segments, metrics) = TimedSegments::new(iter).run().unwrap();

        assert_eq!(metrics.segment_count, segments.len());
        assert_eq!(segments.concat(), "a. b. c");
    }
}
