//! Bookkeeping for the AI summary panel.
//!
//! A refresh is due whenever the review count differs from the count the
//! last refresh was started for. Overlapping refreshes are allowed; each one
//! carries a generation number and a response is only applied if it is newer
//! than the summary currently shown.

use revieai_ai::AiError;
use revieai_core::AISummaryData;

/// What happened when a refresh resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The response replaced the stored summary.
    Applied,
    /// A newer response had already been applied; this one was dropped.
    Stale,
    /// The call failed; the previous summary is kept.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SummarySlot {
    data: Option<AISummaryData>,
    /// Review count the latest refresh was started for.
    observed_count: Option<usize>,
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl SummarySlot {
    pub fn data(&self) -> Option<&AISummaryData> {
        self.data.as_ref()
    }

    /// True while any refresh is in flight.
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Generation of the summary currently shown (0 if none).
    pub fn applied_generation(&self) -> u64 {
        self.applied
    }

    pub fn needs_refresh(&self, review_count: usize) -> bool {
        self.observed_count != Some(review_count)
    }

    /// Record the start of a refresh and return its generation.
    pub fn begin(&mut self, review_count: usize) -> u64 {
        self.observed_count = Some(review_count);
        self.issued += 1;
        self.in_flight += 1;
        self.issued
    }

    /// Record the outcome of the refresh started as `generation`.
    pub fn settle(
        &mut self,
        generation: u64,
        result: Result<AISummaryData, AiError>,
    ) -> Settled {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(data) if generation > self.applied => {
                self.data = Some(data);
                self.applied = generation;
                Settled::Applied
            }
            Ok(_) => Settled::Stale,
            Err(_) => Settled::Failed,
        }
    }
}
