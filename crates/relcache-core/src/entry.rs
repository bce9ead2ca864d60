use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};
use crate::value::Value;

/// A cached result set: ordered column names plus row-major values.
///
/// Column names may be synthetic placeholders when the source could not
/// report real ones; correctness depends only on positional alignment
/// between `columns` and each row, never on name content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Value>>,
}

impl Entry {
    pub fn new(columns: Vec<String>, values: Vec<Vec<Value>>) -> Self {
        Self { columns, values }
    }

    /// An entry with no columns and no rows, served by cache-only reads
    /// that find nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that every row has exactly as many values as there are
    /// columns. Skipped when column names are unknown (empty), since the
    /// row width is then the only shape information available.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        for (row, values) in self.values.iter().enumerate() {
            if values.len() != self.columns.len() {
                return Err(CacheError::Corrupt {
                    row,
                    expected: self.columns.len(),
                    found: values.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let entry = Entry::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Value::Int(1), Value::from("a8m")],
                vec![Value::Int(2), Value::Null],
            ],
        );
        assert!(entry.validate().is_ok());
        assert_eq!(entry.row_count(), 2);
    }

    #[test]
    fn test_validate_row_width_mismatch() {
        let entry = Entry::new(
            vec!["id".to_string(), "name".to_string()],
            vec![vec![Value::Int(1)]],
        );
        match entry.validate() {
            Err(CacheError::Corrupt {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 0);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected corrupt entry error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_unknown_columns() {
        // Rows without reported column names are accepted as-is.
        let entry = Entry::new(vec![], vec![vec![Value::Int(1)], vec![]]);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_empty() {
        let entry = Entry::empty();
        assert!(entry.is_empty());
        assert_eq!(entry.row_count(), 0);
        assert!(entry.columns.is_empty());
    }
}
