//! IAT Flux - Compute engine for Implicit Association Test scores
//!
//! Flux turns survey exports into per-participant scores through a
//! deterministic pipeline: trial-log normalization → CSV parsing → reaction-time
//! filtering → exclusion → grouped statistics → D-score.
//!
//! ## Outputs
//!
//! - **D-scores**: one column per IAT variant (weight attitude and the
//!   flower/insect decoy), with sentinels for missing, excluded and unusable logs
//! - **BMI**: derived from the height and weight selections

pub mod bmi;
pub mod config;
pub mod dscore;
pub mod error;
pub mod exclusion;
pub mod merger;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod statistics;
pub mod table;
pub mod types;

pub use config::{BmiColumns, IatVariant, ScoringConfig};
pub use error::ScoreError;
pub use merger::{combine_sources, score_variant, SurveyScores, VariantScores};
pub use pipeline::{compute_d_score, score_participant, DScoreProcessor};
pub use table::{ColumnSource, SurveyTable};
pub use types::{
    DScoreBreakdown, ExclusionOutcome, ParticipantOutcome, ParticipantResult, ScoreSummary,
    TrialRecord, BMI_MISSING_SENTINEL, EXCLUDED_SENTINEL, INVALID_SENTINEL, NO_DATA_SENTINEL,
};

/// Flux version
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");
