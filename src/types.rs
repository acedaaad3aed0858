//! Core types for the IAT Flux pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: trial records, exclusion outcomes, D-score breakdowns, and the
//! per-participant result that ends up in the output column.

use serde::{Deserialize, Serialize};

/// Output value for a participant with no IAT session
pub const NO_DATA_SENTINEL: f64 = -100.0;

/// Output value for a participant who failed the fast-response exclusion rule
pub const EXCLUDED_SENTINEL: f64 = -101.0;

/// Output value for a participant whose trial log could not be scored
pub const INVALID_SENTINEL: f64 = -102.0;

/// Output value for a participant missing a height or weight answer
pub const BMI_MISSING_SENTINEL: f64 = -1.0;

/// One trial of a participant's IAT session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Reaction time (milliseconds)
    pub rt: f64,
    /// Block identifier (1-7; 3, 4, 6 and 7 are scored)
    pub block: u32,
    /// Category pairing active for the session, as logged
    pub cond: String,
}

impl TrialRecord {
    pub fn new(rt: f64, block: u32, cond: impl Into<String>) -> Self {
        Self {
            rt,
            block,
            cond: cond.into(),
        }
    }
}

/// Result of the fast-response exclusion check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExclusionOutcome {
    /// Trials faster than the threshold
    pub fast_trials: usize,
    /// Trials considered (after the reaction-time ceiling)
    pub total_trials: usize,
    /// fast_trials / total_trials
    pub fast_fraction: f64,
    /// Whether the participant is excluded
    pub excluded: bool,
}

/// Every intermediate of a D-score computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DScoreBreakdown {
    /// mean(6) - mean(3)
    pub diff_36: f64,
    /// mean(7) - mean(4)
    pub diff_47: f64,
    /// diff_36 / pooled sd(3, 6)
    pub ratio_36: f64,
    /// diff_47 / pooled sd(4, 7)
    pub ratio_47: f64,
    /// (ratio_36 + ratio_47) / 2, before sign correction
    pub raw_score: f64,
    /// Whether the participant saw the counterbalanced pairing first
    pub reversed: bool,
    /// Final, sign-corrected D-score
    pub d_score: f64,
}

/// Detailed outcome of scoring one trial log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParticipantOutcome {
    Scored(DScoreBreakdown),
    Excluded(ExclusionOutcome),
}

/// Per-participant, per-variant result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParticipantResult {
    /// Valid D-score
    Scored { d_score: f64 },
    /// No trial log for this participant
    NoData,
    /// Too many fast responses
    Excluded,
    /// Trial log present but unusable
    Invalid { reason: String },
}

impl ParticipantResult {
    /// Value written to the output column
    pub fn to_sentinel(&self) -> f64 {
        match self {
            ParticipantResult::Scored { d_score } => *d_score,
            ParticipantResult::NoData => NO_DATA_SENTINEL,
            ParticipantResult::Excluded => EXCLUDED_SENTINEL,
            ParticipantResult::Invalid { .. } => INVALID_SENTINEL,
        }
    }

    pub fn d_score(&self) -> Option<f64> {
        match self {
            ParticipantResult::Scored { d_score } => Some(*d_score),
            _ => None,
        }
    }
}

impl From<ParticipantOutcome> for ParticipantResult {
    fn from(outcome: ParticipantOutcome) -> Self {
        match outcome {
            ParticipantOutcome::Scored(breakdown) => ParticipantResult::Scored {
                d_score: breakdown.d_score,
            },
            ParticipantOutcome::Excluded(_) => ParticipantResult::Excluded,
        }
    }
}

/// Counts of each result kind for one variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub scored: usize,
    pub no_data: usize,
    pub excluded: usize,
    pub invalid: usize,
}

impl ScoreSummary {
    pub fn from_results(results: &[ParticipantResult]) -> Self {
        let mut summary = ScoreSummary::default();
        for result in results {
            match result {
                ParticipantResult::Scored { .. } => summary.scored += 1,
                ParticipantResult::NoData => summary.no_data += 1,
                ParticipantResult::Excluded => summary.excluded += 1,
                ParticipantResult::Invalid { .. } => summary.invalid += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.scored + self.no_data + self.excluded + self.invalid
    }
}
