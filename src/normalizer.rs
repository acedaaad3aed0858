//! Trial-log normalization
//!
//! The survey export stores each IAT session as a CSV document inside a CSV
//! cell, escaping it twice. This module undoes the escaping:
//! - A stray quote wrapping the `block,trial` header
//! - Tripled quotes left around quoted fields
//! - Doubled quotes left inside quoted fields
//!
//! The rewrites run in that order and each one sees the output of the last.

/// Header prefix of every exported trial log
const HEADER_PREFIX: &str = "block,trial";

/// Normalizer for embedded trial logs
pub struct TrialLogNormalizer;

impl TrialLogNormalizer {
    /// Repair export artifacts so the text parses as plain CSV
    pub fn normalize(raw: &str) -> String {
        let quoted_header = format!("\"{HEADER_PREFIX}");
        raw.replace(&quoted_header, HEADER_PREFIX)
            .replace("\"\"\"", "\"\"")
            .replace("\"\"", "\"")
    }
}
