//! Table, Row, and Cell data structures

use std::borrow::Cow;

use serde::Serialize;

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to a display string for the console
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            other => other.to_field(),
        }
    }

    /// Convert to a delimited-text field; nulls become empty fields
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

/// A record in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Field text as read from the source, cleared for cells that were rewritten
    pub raw: Vec<Option<String>>,
    /// Original line number in source file (1-indexed, header is line 1)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self {
            cells,
            raw: Vec::new(),
            source_line,
        }
    }

    /// A row that remembers the source text of each cell
    pub fn with_raw(cells: Vec<CellValue>, raw: Vec<String>, source_line: usize) -> Self {
        Self {
            cells,
            raw: raw.into_iter().map(Some).collect(),
            source_line,
        }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Replace the cell at `index`; its source text no longer applies
    pub fn set(&mut self, index: usize, value: CellValue) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
        if let Some(raw) = self.raw.get_mut(index) {
            *raw = None;
        }
    }

    /// True when the cell at `index` is absent or null
    pub fn is_absent(&self, index: usize) -> bool {
        self.get(index).map_or(true, CellValue::is_null)
    }

    /// Delimited-text field for the cell at `index`.
    ///
    /// Untouched cells keep their source text; absent cells are empty.
    pub fn field(&self, index: usize) -> Cow<'_, str> {
        match self.get(index) {
            None | Some(CellValue::Null) => Cow::Borrowed(""),
            Some(cell) => match self.raw.get(index) {
                Some(Some(raw)) => Cow::Borrowed(raw.as_str()),
                _ => cell.to_field(),
            },
        }
    }
}

/// An ordered set of records sharing a column set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from column names and rows, inferring column types.
    ///
    /// Rows are numbered as if they followed a header line.
    pub fn from_rows<S>(names: impl IntoIterator<Item = S>, rows: Vec<Vec<CellValue>>) -> Self
    where
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();
        let mut table = Table::new(columns);
        for (i, cells) in rows.into_iter().enumerate() {
            table.add_row(cells, i + 2);
        }
        table.infer_column_types();
        table
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// A new table with these columns and the given rows, types re-inferred
    pub fn with_rows(&self, rows: Vec<Row>) -> Table {
        let mut table = Table {
            columns: self.columns.clone(),
            rows,
        };
        table.infer_column_types();
        table
    }

    /// Widen each column's type over all of its cells
    pub fn infer_column_types(&mut self) {
        for col in &mut self.columns {
            let idx = col.index;
            col.inferred_type = self
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(CellType::of)
                .fold(CellType::Null, CellType::widen);
        }
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at `row` in the named column
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
