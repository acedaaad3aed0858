//! Survey table access
//!
//! Every scoring path reads survey columns through [`ColumnSource`], so the
//! table can come from any loader. [`SurveyTable`] is the in-memory
//! implementation: named text columns of equal length, where `None` marks an
//! empty cell.

use crate::error::ScoreError;

/// Read access to named columns of a survey table
pub trait ColumnSource {
    /// Number of rows, including leading metadata rows
    fn row_count(&self) -> usize;

    /// Cells of the named column
    fn column(&self, name: &str) -> Result<&[Option<String>], ScoreError>;
}

/// In-memory survey table
#[derive(Debug, Clone, Default)]
pub struct SurveyTable {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
    row_count: usize,
}

impl SurveyTable {
    pub fn new(row_count: usize) -> Self {
        Self {
            headers: Vec::new(),
            columns: Vec::new(),
            row_count,
        }
    }

    /// Build a table from (header, cells) pairs; all columns must have the
    /// same length
    pub fn from_columns<I, S>(columns: I) -> Result<Self, ScoreError>
    where
        I: IntoIterator<Item = (S, Vec<Option<String>>)>,
        S: Into<String>,
    {
        let mut columns = columns.into_iter().peekable();
        let row_count = columns.peek().map(|(_, cells)| cells.len()).unwrap_or(0);

        let mut table = Self::new(row_count);
        for (name, cells) in columns {
            table.push_column(name, cells)?;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Append a text column, replacing any existing column of the same name
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<Option<String>>,
    ) -> Result<(), ScoreError> {
        let name = name.into();
        if cells.len() != self.row_count {
            return Err(ScoreError::ColumnLengthMismatch {
                column: name,
                expected: self.row_count,
                actual: cells.len(),
            });
        }

        match self.headers.iter().position(|h| *h == name) {
            Some(idx) => self.columns[idx] = cells,
            None => {
                self.headers.push(name);
                self.columns.push(cells);
            }
        }
        Ok(())
    }

    /// Append a numeric column; `None` stays an empty cell
    pub fn push_numeric_column(
        &mut self,
        name: impl Into<String>,
        values: &[Option<f64>],
    ) -> Result<(), ScoreError> {
        let cells = values
            .iter()
            .map(|value| value.map(|v| v.to_string()))
            .collect();
        self.push_column(name, cells)
    }
}

impl ColumnSource for SurveyTable {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column(&self, name: &str) -> Result<&[Option<String>], ScoreError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| ScoreError::MissingColumn(name.to_string()))
    }
}

/// Whether a cell holds usable text
pub(crate) fn populated(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_from_columns() {
        let table = SurveyTable::from_columns(vec![
            ("a", cells(&[Some("1"), None])),
            ("b", cells(&[None, Some("2")])),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.column("b").unwrap()[1].as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_column() {
        let table = SurveyTable::new(3);
        assert!(matches!(table.column("x"), Err(ScoreError::MissingColumn(name)) if name == "x"));
    }

    #[test]
    fn test_length_mismatch() {
        let result = SurveyTable::from_columns(vec![
            ("a", cells(&[Some("1"), None])),
            ("b", cells(&[None])),
        ]);
        assert!(matches!(
            result,
            Err(ScoreError::ColumnLengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_numeric_column_overwrites() {
        let mut table = SurveyTable::new(3);
        table.push_numeric_column("score", &[None, Some(-100.0), Some(0.5)]).unwrap();
        table.push_numeric_column("score", &[None, None, Some(1.25)]).unwrap();

        assert_eq!(table.headers().len(), 1);
        assert_eq!(table.column("score").unwrap(), &cells(&[None, None, Some("1.25")])[..]);
    }

    #[test]
    fn test_populated() {
        assert_eq!(populated(&Some("log".to_string())), Some("log"));
        assert_eq!(populated(&Some(" \n".to_string())), None);
        assert_eq!(populated(&None), None);
    }
}
