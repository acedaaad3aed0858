//! Scoring configuration
//!
//! Thresholds, survey column names and the per-variant counterbalance label.
//! Defaults reproduce the weight-attitude study the pipeline was built for;
//! the whole structure can be loaded from JSON.

use crate::error::ScoreError;
use serde::{Deserialize, Serialize};

/// Trials slower than this are dropped before anything else (milliseconds)
pub const DEFAULT_RT_CEILING_MS: f64 = 10_000.0;

/// Trials faster than this count toward exclusion (milliseconds)
pub const DEFAULT_FAST_THRESHOLD_MS: f64 = 300.0;

/// Participants with a larger share of fast trials are excluded
pub const DEFAULT_MAX_FAST_FRACTION: f64 = 0.10;

/// Leading table rows holding question text and import identifiers
pub const DEFAULT_METADATA_ROWS: usize = 2;

/// First-block condition of participants who saw the fat/bad pairing first
pub const FAT_BAD_FIRST_LABEL: &str = "Fat people/Bad words,Thin people/Good words";

/// One IAT variant and the survey columns it is stored in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IatVariant {
    /// Column stem; logs live in "Desktop <stem>" and "Mobile <stem>"
    pub column_stem: String,
    /// Name of the derived D-score column
    pub output_column: String,
    /// First-block condition that reverses the score sign
    pub counterbalance_label: Option<String>,
}

impl IatVariant {
    pub fn new(column_stem: impl Into<String>, output_column: impl Into<String>) -> Self {
        Self {
            column_stem: column_stem.into(),
            output_column: output_column.into(),
            counterbalance_label: None,
        }
    }

    pub fn with_counterbalance_label(mut self, label: impl Into<String>) -> Self {
        self.counterbalance_label = Some(label.into());
        self
    }

    pub fn desktop_column(&self) -> String {
        format!("Desktop {}", self.column_stem)
    }

    pub fn mobile_column(&self) -> String {
        format!("Mobile {}", self.column_stem)
    }

    /// Weight-attitude IAT
    pub fn weight() -> Self {
        Self::new("IAT", "Weight D-Scores").with_counterbalance_label(FAT_BAD_FIRST_LABEL)
    }

    /// Flower/insect decoy IAT
    pub fn decoy() -> Self {
        // Same label as the weight IAT; decoy conditions never carry it.
        Self::new("Decoy", "Flower/Insect D-Scores").with_counterbalance_label(FAT_BAD_FIRST_LABEL)
    }
}

/// Survey columns holding the anthropometric answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiColumns {
    pub height_column: String,
    pub weight_column: String,
    pub output_column: String,
}

impl Default for BmiColumns {
    fn default() -> Self {
        Self {
            height_column: "Q25_1".to_string(),
            weight_column: "Q26_1".to_string(),
            output_column: "BMI".to_string(),
        }
    }
}

/// Full scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub rt_ceiling_ms: f64,
    pub fast_threshold_ms: f64,
    pub max_fast_fraction: f64,
    pub metadata_rows: usize,
    pub variants: Vec<IatVariant>,
    pub bmi: BmiColumns,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rt_ceiling_ms: DEFAULT_RT_CEILING_MS,
            fast_threshold_ms: DEFAULT_FAST_THRESHOLD_MS,
            max_fast_fraction: DEFAULT_MAX_FAST_FRACTION,
            metadata_rows: DEFAULT_METADATA_ROWS,
            variants: vec![IatVariant::weight(), IatVariant::decoy()],
            bmi: BmiColumns::default(),
        }
    }
}

impl ScoringConfig {
    /// Load configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON
    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_rt_ceiling_ms(mut self, ceiling_ms: f64) -> Self {
        self.rt_ceiling_ms = ceiling_ms;
        self
    }

    pub fn with_fast_threshold_ms(mut self, threshold_ms: f64) -> Self {
        self.fast_threshold_ms = threshold_ms;
        self
    }

    pub fn with_max_fast_fraction(mut self, fraction: f64) -> Self {
        self.max_fast_fraction = fraction;
        self
    }

    pub fn with_metadata_rows(mut self, rows: usize) -> Self {
        self.metadata_rows = rows;
        self
    }

    pub fn with_variants(mut self, variants: Vec<IatVariant>) -> Self {
        self.variants = variants;
        self
    }

    /// Check that thresholds are consistent
    pub fn validate(&self) -> Result<(), ScoreError> {
        if !(self.rt_ceiling_ms > 0.0) {
            return Err(ScoreError::InvalidConfig(format!(
                "rt_ceiling_ms must be positive, got {}",
                self.rt_ceiling_ms
            )));
        }
        if !(0.0..=self.rt_ceiling_ms).contains(&self.fast_threshold_ms) {
            return Err(ScoreError::InvalidConfig(format!(
                "fast_threshold_ms must be within 0..={}, got {}",
                self.rt_ceiling_ms, self.fast_threshold_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.max_fast_fraction) {
            return Err(ScoreError::InvalidConfig(format!(
                "max_fast_fraction must be within 0..=1, got {}",
                self.max_fast_fraction
            )));
        }
        if self.variants.is_empty() {
            return Err(ScoreError::InvalidConfig(
                "at least one IAT variant is required".to_string(),
            ));
        }
        Ok(())
    }
}
