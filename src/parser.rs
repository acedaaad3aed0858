//! Trial-log parsing
//!
//! Parses a normalized trial log into [`TrialRecord`]s. Columns are found by
//! header name, so logs with extra or reordered columns parse the same way.

use crate::error::ScoreError;
use crate::types::TrialRecord;
use csv::{ReaderBuilder, StringRecord};

const RT_COLUMN: &str = "rt";
const BLOCK_COLUMN: &str = "block";
const COND_COLUMN: &str = "cond";

/// Parser for normalized trial logs
pub struct TrialLogParser;

impl TrialLogParser {
    /// Parse normalized CSV text into trial records, in source order
    pub fn parse(normalized: &str) -> Result<Vec<TrialRecord>, ScoreError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(normalized.as_bytes());
        let headers = reader.headers()?.clone();

        let rt_idx = column_index(&headers, RT_COLUMN)?;
        let block_idx = column_index(&headers, BLOCK_COLUMN)?;
        let cond_idx = column_index(&headers, COND_COLUMN)?;

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let row = result?;
            let row_num = row_num + 1;

            let rt = parse_rt(field(&row, rt_idx, RT_COLUMN, row_num)?, row_num)?;
            let block = parse_block(field(&row, block_idx, BLOCK_COLUMN, row_num)?, row_num)?;
            let cond = row.get(cond_idx).unwrap_or("").to_string();

            records.push(TrialRecord { rt, block, cond });
        }

        Ok(records)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, ScoreError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| ScoreError::MalformedLog(format!("missing '{}' column", name)))
}

fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    name: &str,
    row_num: usize,
) -> Result<&'r str, ScoreError> {
    row.get(idx).ok_or_else(|| {
        ScoreError::MalformedLog(format!("row {}: no value for '{}'", row_num, name))
    })
}

/// Reaction times must be finite, non-negative numbers
fn parse_rt(value: &str, row_num: usize) -> Result<f64, ScoreError> {
    let rt: f64 = value.trim().parse().map_err(|_| {
        ScoreError::MalformedLog(format!("row {}: rt '{}' is not numeric", row_num, value))
    })?;

    if !rt.is_finite() || rt < 0.0 {
        return Err(ScoreError::MalformedLog(format!(
            "row {}: rt {} is out of range",
            row_num, rt
        )));
    }

    Ok(rt)
}

/// Block ids are integers; spreadsheet round-trips may write them as `3.0`
fn parse_block(value: &str, row_num: usize) -> Result<u32, ScoreError> {
    let trimmed = value.trim();
    if let Ok(block) = trimmed.parse::<u32>() {
        return Ok(block);
    }

    match trimmed.parse::<f64>() {
        Ok(block) if block.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&block) => {
            Ok(block as u32)
        }
        _ => Err(ScoreError::MalformedLog(format!(
            "row {}: block '{}' is not an integer",
            row_num, value
        ))),
    }
}
