//! Reader stage: loads a delimited text file into a [`Table`]

mod cell;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::model::{CellValue, Column, Row, Table};

pub use cell::parse_cell_value;

/// Read a comma-separated file whose first line is a header.
///
/// Every data line becomes one row; cells are type-inferred and each
/// column's type is widened over its cells. The file handle is closed
/// before this returns.
pub fn read(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EtlError::NotFound {
            path: path.to_path_buf(),
        },
        _ => EtlError::Io(e),
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(BufReader::new(file));

    let headers = csv_reader
        .headers()
        .map_err(|e| csv_error(path, e, 1))?
        .clone();

    if headers.is_empty() {
        return Err(parse_error(path, 1, "missing header row"));
    }

    let mut seen = IndexSet::new();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(parse_error(path, 1, format!("duplicate column `{name}`")));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name, i))
        .collect();

    let mut table = Table::new(columns);

    for (idx, result) in csv_reader.records().enumerate() {
        // +2 for 1-indexing and header
        let fallback_line = idx + 2;
        let record = result.map_err(|e| csv_error(path, e, fallback_line as u64))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
        let raw = record.iter().map(|field| field.trim().to_owned()).collect();
        debug!(line, fields = cells.len(), "read record");
        table.rows.push(Row::with_raw(cells, raw, line));
    }

    table.infer_column_types();

    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    Ok(table)
}

fn parse_error(path: &Path, line: u64, message: impl Into<String>) -> EtlError {
    EtlError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn csv_error(path: &Path, err: csv::Error, fallback_line: u64) -> EtlError {
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => EtlError::Io(e),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => parse_error(
            path,
            line,
            format!("expected {expected_len} fields, found {len}"),
        ),
        csv::ErrorKind::Utf8 { err, .. } => parse_error(
            path,
            line,
            format!("invalid UTF-8 in field {}", err.field() + 1),
        ),
        other => parse_error(path, line, format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::CellType;

    fn write_input(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_employees() {
        let file = write_input(b"department,salary,age\nEng,50000.7,30\n,60000,\nHR,40000.2,\n");
        let table = read(file.path()).unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            ["department", "salary", "age"]
        );
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.value(0, "salary"), Some(&CellValue::Float(50000.7)));
        assert_eq!(table.value(1, "department"), Some(&CellValue::Null));
        assert_eq!(table.value(2, "age"), Some(&CellValue::Null));
        assert_eq!(table.rows[2].source_line, 4);
        assert_eq!(table.column("salary").unwrap().inferred_type, CellType::Float);
        assert_eq!(table.column("age").unwrap().inferred_type, CellType::Int);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, EtlError::NotFound { .. }));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let file = write_input(b"department,salary,age\nEng,50000,30\nHR,40000\n");
        match read(file.path()).unwrap_err() {
            EtlError::Parse { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 3 fields"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let file = write_input(b"");
        assert!(matches!(read(file.path()), Err(EtlError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_duplicate_header_is_parse_error() {
        let file = write_input(b"age,salary,age\n1,2,3\n");
        assert!(matches!(read(file.path()), Err(EtlError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let file = write_input(b"department,salary,age\n\xff\xfe,1,2\n");
        assert!(matches!(read(file.path()), Err(EtlError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_source_text_is_kept() {
        let file = write_input(b"id,department,salary,age,flag\n007,Eng,1,30, TRUE\n");
        let table = read(file.path()).unwrap();
        let row = &table.rows[0];

        assert_eq!(row.get(0), Some(&CellValue::Int(7)));
        assert_eq!(row.field(0), "007");
        assert_eq!(row.field(4), "TRUE");
    }

    #[test]
    fn test_nan_salary_reads_as_absent() {
        let file = write_input(b"department,salary,age\nEng,1,30\nHR,NAN,\nOps,#NA,2\n");
        let table = read(file.path()).unwrap();

        assert_eq!(table.value(1, "salary"), Some(&CellValue::Null));
        assert_eq!(table.value(2, "salary"), Some(&CellValue::Null));
        assert_eq!(table.column("salary").unwrap().inferred_type, CellType::Int);
    }

    #[test]
    fn test_quoted_fields() {
        let file = write_input(b"department,salary,age\n\"Sales, East\",1000,\n");
        let table = read(file.path()).unwrap();
        assert_eq!(table.value(0, "department"), Some(&CellValue::from("Sales, East")));
    }
}
