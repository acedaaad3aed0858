//! Grouped reaction-time statistics
//!
//! This module derives the latency statistics a D-score needs:
//! - Mean latency of each scored block (3, 4, 6, 7)
//! - Pooled standard deviation of the practice/test block pairs {3,6} and {4,7}
//!
//! Pooling means the two blocks' latencies form a single sample before the
//! deviation is taken. Deviations are population deviations (divide by N).

use crate::error::ScoreError;
use crate::types::TrialRecord;
use serde::{Deserialize, Serialize};

/// Latency statistics for one participant's filtered trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupedStatistics {
    pub mean_3: f64,
    pub mean_4: f64,
    pub mean_6: f64,
    pub mean_7: f64,
    /// Pooled deviation of blocks 3 and 6
    pub sd_36: f64,
    /// Pooled deviation of blocks 4 and 7
    pub sd_47: f64,
}

impl GroupedStatistics {
    /// Compute every statistic, failing on an absent block or a pooled
    /// group whose deviation is zero
    pub fn compute(records: &[TrialRecord]) -> Result<Self, ScoreError> {
        Ok(Self {
            mean_3: block_mean(records, 3)?,
            mean_4: block_mean(records, 4)?,
            mean_6: block_mean(records, 6)?,
            mean_7: block_mean(records, 7)?,
            sd_36: nonzero(pooled_std_dev(records, 3, 6)?, 3, 6)?,
            sd_47: nonzero(pooled_std_dev(records, 4, 7)?, 4, 7)?,
        })
    }
}

/// Mean reaction time of one block
pub fn block_mean(records: &[TrialRecord], block: u32) -> Result<f64, ScoreError> {
    let latencies = block_latencies(records, &[block]);
    mean(&latencies)
        .ok_or_else(|| ScoreError::DegenerateGroup(format!("no trials in block {}", block)))
}

/// Population standard deviation of two blocks pooled into one sample
pub fn pooled_std_dev(records: &[TrialRecord], block_a: u32, block_b: u32) -> Result<f64, ScoreError> {
    let latencies = block_latencies(records, &[block_a, block_b]);
    population_std_dev(&latencies).ok_or_else(|| {
        ScoreError::DegenerateGroup(format!("no trials in blocks {} and {}", block_a, block_b))
    })
}

fn block_latencies(records: &[TrialRecord], blocks: &[u32]) -> Vec<f64> {
    records
        .iter()
        .filter(|r| blocks.contains(&r.block))
        .map(|r| r.rt)
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

fn nonzero(sd: f64, block_a: u32, block_b: u32) -> Result<f64, ScoreError> {
    if sd > 0.0 {
        Ok(sd)
    } else {
        Err(ScoreError::DegenerateGroup(format!(
            "blocks {} and {} have zero latency variance",
            block_a, block_b
        )))
    }
}
