//! D-score computation
//!
//! Combines grouped latency statistics into the standardized IAT effect size.
//! Participants are counterbalanced over which pairing they see first; the
//! sign is flipped for one group so that a positive score always points the
//! same way.

use crate::statistics::GroupedStatistics;
use crate::types::DScoreBreakdown;

/// Calculator for sign-corrected D-scores
pub struct DScoreCalculator;

impl DScoreCalculator {
    /// Compute the D-score from grouped statistics
    ///
    /// # Arguments
    /// * `stats` - Block means and pooled deviations
    /// * `first_condition` - Condition label of the participant's first trial
    /// * `counterbalance_label` - First condition that reverses the sign
    pub fn compute(
        stats: &GroupedStatistics,
        first_condition: &str,
        counterbalance_label: Option<&str>,
    ) -> DScoreBreakdown {
        let diff_36 = stats.mean_6 - stats.mean_3;
        let diff_47 = stats.mean_7 - stats.mean_4;

        let ratio_36 = diff_36 / stats.sd_36;
        let ratio_47 = diff_47 / stats.sd_47;

        let raw_score = (ratio_36 + ratio_47) / 2.0;

        let reversed = counterbalance_label.is_some_and(|label| label == first_condition);
        let d_score = if reversed { -raw_score } else { raw_score };

        DScoreBreakdown {
            diff_36,
            diff_47,
            ratio_36,
            ratio_47,
            raw_score,
            reversed,
            d_score,
        }
    }
}
