//! CSV sheets shown as spreadsheet panels.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read sheet {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse sheet: {0}")]
    Parse(#[from] csv::Error),
    #[error("sheet has no rows")]
    Empty,
}

/// A header row plus data rows, every row padded to the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// A column is numeric when every non-empty data cell parses as a number.
    pub fn is_numeric_column(&self, column: usize) -> bool {
        let mut saw_value = false;
        for row in &self.rows {
            let cell = row.get(column).map_or("", |c| c.trim());
            if cell.is_empty() {
                continue;
            }
            saw_value = true;
            if !looks_numeric(cell) {
                return false;
            }
        }
        saw_value
    }

    fn from_records(records: Vec<Vec<String>>) -> Result<Self, SheetError> {
        let mut iter = records.into_iter();
        let Some(mut header) = iter.next() else {
            return Err(SheetError::Empty);
        };
        let mut rows: Vec<Vec<String>> = iter.collect();
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        header.resize(width, String::new());
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Ok(Self { header, rows })
    }
}

/// Parse inline CSV text.
///
/// # Errors
///
/// Returns [`SheetError::Parse`] for malformed CSV and [`SheetError::Empty`]
/// when there is no header row.
pub fn parse_sheet(text: &str) -> Result<Sheet, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(ToString::to_string).collect());
    }
    Sheet::from_records(records)
}

/// Load a CSV file from disk.
///
/// # Errors
///
/// Returns [`SheetError::Read`] when the file cannot be opened or parsed and
/// [`SheetError::Empty`] when it has no rows.
pub fn load_sheet(path: &Path) -> Result<Sheet, SheetError> {
    let read_err = |source| SheetError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        records.push(record.iter().map(ToString::to_string).collect());
    }
    Sheet::from_records(records)
}

fn looks_numeric(cell: &str) -> bool {
    let cleaned: String = cell
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_sheet_splits_header_and_rows() {
        let sheet = parse_sheet("Arm,N,ORR\nDrug A,120,45.0%\nPlacebo,118,12.7%\n").unwrap();
        assert_eq!(sheet.header(), ["Arm", "N", "ORR"]);
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[1][0], "Placebo");
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let sheet = parse_sheet("a,b\n1\n1,2,3\n").unwrap();
        assert_eq!(sheet.column_count(), 3);
        assert!(sheet.rows().iter().all(|row| row.len() == 3));
        assert_eq!(sheet.header()[2], "");
    }

    #[test]
    fn test_empty_sheet_is_an_error() {
        assert!(matches!(parse_sheet(""), Err(SheetError::Empty)));
    }

    #[test]
    fn test_numeric_column_detection() {
        let sheet = parse_sheet("Arm,N,ORR\nA,1,\"1,200\"\nB,,40%\n").unwrap();
        assert!(!sheet.is_numeric_column(0));
        assert!(sheet.is_numeric_column(1));
        assert!(sheet.is_numeric_column(2));
    }

    #[test]
    fn test_load_sheet_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ae.csv");
        std::fs::write(&path, "Term,Count\nNausea,12\n").unwrap();
        let sheet = load_sheet(&path).unwrap();
        assert_eq!(sheet.rows(), [vec!["Nausea".to_string(), "12".to_string()]]);
    }

    #[test]
    fn test_load_missing_sheet_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = load_sheet(&path).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }
}
