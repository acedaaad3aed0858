//! Pipeline orchestration
//!
//! This module provides the public API for IAT Flux.
//! It orchestrates the full pipeline from a raw embedded trial log to a
//! per-participant D-score, and from a survey table to derived score columns.

use crate::bmi::bmi_column;
use crate::config::{IatVariant, ScoringConfig};
use crate::dscore::DScoreCalculator;
use crate::error::ScoreError;
use crate::exclusion::{apply_rt_ceiling, ExclusionEvaluator};
use crate::merger::{score_variant, SurveyScores, VariantScores};
use crate::normalizer::TrialLogNormalizer;
use crate::parser::TrialLogParser;
use crate::statistics::GroupedStatistics;
use crate::table::ColumnSource;
use crate::types::{ParticipantOutcome, ParticipantResult};
use chrono::Utc;

/// Score one participant's raw trial log.
///
/// Never fails: a missing log becomes [`ParticipantResult::NoData`] without
/// any parsing, and every pipeline error becomes
/// [`ParticipantResult::Invalid`].
///
/// # Arguments
/// * `raw_log` - Trial log cell as exported, `None` if the cell was empty
/// * `config` - Thresholds
/// * `variant` - IAT variant, for its counterbalance label
pub fn score_participant(
    raw_log: Option<&str>,
    config: &ScoringConfig,
    variant: &IatVariant,
) -> ParticipantResult {
    let raw_log = match raw_log {
        Some(text) if !text.trim().is_empty() => text,
        _ => return ParticipantResult::NoData,
    };

    match compute_d_score(raw_log, config, variant) {
        Ok(outcome) => {
            log::debug!("{}: {:?}", variant.column_stem, outcome);
            outcome.into()
        }
        Err(e) => {
            log::warn!("{}: trial log could not be scored: {}", variant.column_stem, e);
            ParticipantResult::Invalid {
                reason: e.to_string(),
            }
        }
    }
}

/// Run the full pipeline on a present trial log.
///
/// Pipeline stages:
/// 1. TrialLogNormalizer - Undo the export's quote escaping
/// 2. TrialLogParser - Parse CSV into trial records
/// 3. apply_rt_ceiling - Drop trials slower than the ceiling
/// 4. ExclusionEvaluator - Exclude participants with too many fast trials
/// 5. GroupedStatistics - Block means and pooled deviations
/// 6. DScoreCalculator - Effect size and sign correction
pub fn compute_d_score(
    raw_log: &str,
    config: &ScoringConfig,
    variant: &IatVariant,
) -> Result<ParticipantOutcome, ScoreError> {
    // Stage 1: Normalize the embedded CSV
    let normalized = TrialLogNormalizer::normalize(raw_log);

    // Stage 2: Parse trial records
    let records = TrialLogParser::parse(&normalized)?;

    // Stage 3: Drop slow trials before anything is counted
    let filtered = apply_rt_ceiling(records, config.rt_ceiling_ms);

    // Stage 4: Exclusion check (may end the pipeline)
    let exclusion = ExclusionEvaluator::evaluate(
        &filtered,
        config.fast_threshold_ms,
        config.max_fast_fraction,
    )?;
    if exclusion.excluded {
        return Ok(ParticipantOutcome::Excluded(exclusion));
    }

    // Stage 5: Grouped statistics
    let stats = GroupedStatistics::compute(&filtered)?;

    // Stage 6: D-score, keyed on the first remaining trial's condition
    let first_condition = filtered
        .first()
        .map(|record| record.cond.as_str())
        .unwrap_or_default();
    let breakdown = DScoreCalculator::compute(
        &stats,
        first_condition,
        variant.counterbalance_label.as_deref(),
    );

    Ok(ParticipantOutcome::Scored(breakdown))
}

/// Processor holding a scoring configuration.
///
/// Use this to score whole survey tables with one set of thresholds.
pub struct DScoreProcessor {
    config: ScoringConfig,
}

impl Default for DScoreProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DScoreProcessor {
    /// Create a processor with default settings
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    /// Create a processor with a validated configuration
    pub fn with_config(config: ScoringConfig) -> Result<Self, ScoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load configuration from JSON
    pub fn from_config_json(json: &str) -> Result<Self, ScoreError> {
        Ok(Self {
            config: ScoringConfig::from_json(json)?,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a single trial log for a variant
    pub fn score_log(&self, raw_log: Option<&str>, variant: &IatVariant) -> ParticipantResult {
        score_participant(raw_log, &self.config, variant)
    }

    /// Score every participant of one variant
    pub fn score_variant(
        &self,
        table: &dyn ColumnSource,
        variant: &IatVariant,
    ) -> Result<VariantScores, ScoreError> {
        score_variant(table, &self.config, variant)
    }

    /// Score every configured variant and the BMI column
    pub fn score_survey(&self, table: &dyn ColumnSource) -> Result<SurveyScores, ScoreError> {
        let bmi = bmi_column(table, &self.config.bmi, self.config.metadata_rows)?;

        let variants = self
            .config
            .variants
            .iter()
            .map(|variant| self.score_variant(table, variant))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SurveyScores {
            computed_at: Utc::now(),
            bmi_column: self.config.bmi.output_column.clone(),
            bmi,
            variants,
        })
    }
}
