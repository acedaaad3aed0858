//! Column merging and survey-level scoring
//!
//! Each IAT variant is stored in two survey columns, one for desktop and one
//! for mobile sessions, and a participant fills at most one of them. This
//! module merges the pair, scores every participant, and lays the results
//! back out in table row order with the metadata rows left empty.

use crate::config::{IatVariant, ScoringConfig};
use crate::error::ScoreError;
use crate::pipeline::score_participant;
use crate::table::{populated, ColumnSource, SurveyTable};
use crate::types::{ParticipantResult, ScoreSummary};
use chrono::{DateTime, Utc};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Scores of one IAT variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantScores {
    /// Column stem of the variant
    pub variant: String,
    /// Name of the derived column
    pub output_column: String,
    /// One result per participant row (metadata rows not included)
    pub results: Vec<ParticipantResult>,
    /// Output column, same length as the table
    pub column: Vec<Option<f64>>,
    pub summary: ScoreSummary,
}

/// Every derived column of a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyScores {
    pub computed_at: DateTime<Utc>,
    pub bmi_column: String,
    pub bmi: Vec<Option<f64>>,
    pub variants: Vec<VariantScores>,
}

impl SurveyScores {
    /// Append the derived columns to a table, BMI first
    pub fn apply_to(&self, table: &mut SurveyTable) -> Result<(), ScoreError> {
        table.push_numeric_column(self.bmi_column.as_str(), &self.bmi)?;
        for variant in &self.variants {
            table.push_numeric_column(variant.output_column.as_str(), &variant.column)?;
        }
        Ok(())
    }

    /// Encode as JSON
    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Merge desktop and mobile trial-log cells.
///
/// The mobile cell wins when both are filled; an index with neither is
/// `None`.
pub fn combine_sources<'a>(
    desktop: &'a [Option<String>],
    mobile: &'a [Option<String>],
) -> Result<Vec<Option<&'a str>>, ScoreError> {
    if desktop.len() != mobile.len() {
        return Err(ScoreError::ColumnLengthMismatch {
            column: "mobile".to_string(),
            expected: desktop.len(),
            actual: mobile.len(),
        });
    }

    Ok(desktop
        .iter()
        .zip(mobile)
        .map(|(desktop, mobile)| populated(mobile).or_else(|| populated(desktop)))
        .collect())
}

/// Score every participant of one variant.
///
/// Participant failures end up in the results; only a missing source column
/// fails the whole variant.
pub fn score_variant(
    table: &dyn ColumnSource,
    config: &ScoringConfig,
    variant: &IatVariant,
) -> Result<VariantScores, ScoreError> {
    let desktop = table.column(&variant.desktop_column())?;
    let mobile = table.column(&variant.mobile_column())?;
    let logs = combine_sources(desktop, mobile)?;

    let metadata_rows = config.metadata_rows.min(logs.len());
    let participant_logs = &logs[metadata_rows..];

    #[cfg(feature = "parallel")]
    let results: Vec<ParticipantResult> = participant_logs
        .par_iter()
        .map(|raw_log| score_participant(*raw_log, config, variant))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<ParticipantResult> = participant_logs
        .iter()
        .map(|raw_log| score_participant(*raw_log, config, variant))
        .collect();

    let column = std::iter::repeat(None)
        .take(metadata_rows)
        .chain(results.iter().map(|result| Some(result.to_sentinel())))
        .collect();

    let summary = ScoreSummary::from_results(&results);
    log::info!(
        "{}: {} scored, {} without data, {} excluded, {} invalid",
        variant.column_stem,
        summary.scored,
        summary.no_data,
        summary.excluded,
        summary.invalid
    );

    Ok(VariantScores {
        variant: variant.column_stem.clone(),
        output_column: variant.output_column.clone(),
        results,
        column,
        summary,
    })
}
