//! Trial filtering and participant exclusion
//!
//! Two rules, applied in order:
//! - Trials slower than the reaction-time ceiling are dropped outright
//! - Participants whose remaining trials are too often faster than the
//!   threshold are excluded
//!
//! The exclusion rate is always computed over the ceiling-filtered trials.

use crate::error::ScoreError;
use crate::types::{ExclusionOutcome, TrialRecord};

/// Drop trials slower than `ceiling_ms`; trials exactly at the ceiling stay
pub fn apply_rt_ceiling(records: Vec<TrialRecord>, ceiling_ms: f64) -> Vec<TrialRecord> {
    records
        .into_iter()
        .filter(|record| record.rt <= ceiling_ms)
        .collect()
}

/// Evaluator for the fast-response exclusion rule
pub struct ExclusionEvaluator;

impl ExclusionEvaluator {
    /// Count trials under `threshold_ms` and exclude when their share is
    /// strictly greater than `max_fast_fraction`
    pub fn evaluate(
        filtered: &[TrialRecord],
        threshold_ms: f64,
        max_fast_fraction: f64,
    ) -> Result<ExclusionOutcome, ScoreError> {
        let total_trials = filtered.len();
        if total_trials == 0 {
            return Err(ScoreError::EmptyTrialLog);
        }

        let fast_trials = filtered.iter().filter(|r| r.rt < threshold_ms).count();
        let fast_fraction = fast_trials as f64 / total_trials as f64;

        Ok(ExclusionOutcome {
            fast_trials,
            total_trials,
            fast_fraction,
            excluded: fast_fraction > max_fast_fraction,
        })
    }
}
