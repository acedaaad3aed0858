//! Body Mass Index from survey selections
//!
//! Height and weight are answered with dropdown selections such as
//! `5 ft 11 in: 180 cm` and `130lb: 59kg`. The open-ended top and bottom
//! weight choices start with `Above` and `Below`.

use crate::config::BmiColumns;
use crate::error::ScoreError;
use crate::table::{populated, ColumnSource};
use crate::types::BMI_MISSING_SENTINEL;
use lazy_static::lazy_static;
use regex::Regex;

/// Pounds assigned to the "Above ..." weight choice
const ABOVE_RANGE_POUNDS: f64 = 300.0;

/// Pounds assigned to the "Below ..." weight choice
const BELOW_RANGE_POUNDS: f64 = 50.0;

/// Imperial BMI factor: kg/m^2 from lb/in^2
const IMPERIAL_BMI_FACTOR: f64 = 703.0;

lazy_static! {
    static ref HEIGHT_PATTERN: Regex = Regex::new(r"^(\d) ft (\d{1,2}) in").unwrap();
    static ref WEIGHT_PATTERN: Regex = Regex::new(r"^(\d{2,3})").unwrap();
}

/// Convert a height selection to inches
pub fn height_to_inches(height: &str) -> Result<f64, ScoreError> {
    let captures = HEIGHT_PATTERN
        .captures(height.trim())
        .ok_or_else(|| ScoreError::InvalidHeight(height.to_string()))?;

    let feet: f64 = captures[1]
        .parse()
        .map_err(|_| ScoreError::InvalidHeight(height.to_string()))?;
    let inches: f64 = captures[2]
        .parse()
        .map_err(|_| ScoreError::InvalidHeight(height.to_string()))?;

    Ok(feet * 12.0 + inches)
}

/// Convert a weight selection to pounds
pub fn weight_to_pounds(weight: &str) -> Result<f64, ScoreError> {
    let weight = weight.trim();
    if weight.starts_with("Above") {
        return Ok(ABOVE_RANGE_POUNDS);
    }
    if weight.starts_with("Below") {
        return Ok(BELOW_RANGE_POUNDS);
    }

    WEIGHT_PATTERN
        .captures(weight)
        .and_then(|captures| captures[1].parse::<f64>().ok())
        .ok_or_else(|| ScoreError::InvalidWeight(weight.to_string()))
}

/// BMI for one participant; a missing answer yields the -1 sentinel
pub fn calculate_bmi(height: Option<&str>, weight: Option<&str>) -> Result<f64, ScoreError> {
    let (Some(height), Some(weight)) = (height, weight) else {
        return Ok(BMI_MISSING_SENTINEL);
    };

    let inches = height_to_inches(height)?;
    if inches <= 0.0 {
        return Err(ScoreError::InvalidHeight(height.to_string()));
    }
    let pounds = weight_to_pounds(weight)?;

    Ok(IMPERIAL_BMI_FACTOR * pounds / (inches * inches))
}

/// BMI column aligned to the table; metadata rows and unparseable answers
/// are `None`
pub fn bmi_column(
    table: &dyn ColumnSource,
    columns: &BmiColumns,
    metadata_rows: usize,
) -> Result<Vec<Option<f64>>, ScoreError> {
    let heights = table.column(&columns.height_column)?;
    let weights = table.column(&columns.weight_column)?;

    let bmis = heights
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(row, (height, weight))| {
            if row < metadata_rows {
                return None;
            }
            match calculate_bmi(populated(height), populated(weight)) {
                Ok(bmi) => Some(bmi),
                Err(e) => {
                    log::warn!("Row {}: {}", row + 1, e);
                    None
                }
            }
        })
        .collect();

    Ok(bmis)
}
