//! JSON confirmations, one object per line

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use termcolor::WriteColor;

use crate::clean::{CleanReport, Cleaned};
use crate::error::Result;
use crate::model::{CellType, CellValue, Table};
use crate::pipeline::Stage;

use super::StageReporter;

/// JSON output formatter; each stage event is a single line
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn emit<T: Serialize>(&self, event: &T, writer: &mut dyn WriteColor) -> Result<()> {
        serde_json::to_writer(&mut *writer, event)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonColumn<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    cell_type: CellType,
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<JsonColumn<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a CleanReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<IndexMap<&'a str, &'a CellValue>>>,
}

fn columns(table: &Table) -> Vec<JsonColumn<'_>> {
    table
        .columns
        .iter()
        .map(|c| JsonColumn {
            name: &c.name,
            cell_type: c.inferred_type,
        })
        .collect()
}

fn records(table: &Table) -> Vec<IndexMap<&str, &CellValue>> {
    table
        .rows
        .iter()
        .map(|row| table.column_names().zip(&row.cells).collect())
        .collect()
}

impl StageReporter for JsonReporter {
    fn extracted(&self, path: &Path, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        let event = JsonEvent {
            stage: Stage::Read,
            path: Some(path.display().to_string()),
            rows: table.row_count(),
            columns: Some(columns(table)),
            report: None,
            records: Some(records(table)),
        };
        self.emit(&event, writer)
    }

    fn transformed(&self, cleaned: &Cleaned, writer: &mut dyn WriteColor) -> Result<()> {
        let event = JsonEvent {
            stage: Stage::Clean,
            path: None,
            rows: cleaned.table.row_count(),
            columns: Some(columns(&cleaned.table)),
            report: Some(&cleaned.report),
            records: Some(records(&cleaned.table)),
        };
        self.emit(&event, writer)
    }

    fn loaded(&self, path: &Path, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        let event = JsonEvent {
            stage: Stage::Write,
            path: Some(path.display().to_string()),
            rows: table.row_count(),
            columns: None,
            report: None,
            records: None,
        };
        self.emit(&event, writer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use termcolor::NoColor;

    use super::*;
    use crate::clean::clean;

    fn sample() -> Table {
        Table::from_rows(
            ["department", "salary", "age"],
            vec![
                vec!["Eng".into(), CellValue::Float(50000.7), CellValue::Int(30)],
                vec!["HR".into(), CellValue::Float(40000.2), CellValue::Null],
            ],
        )
    }

    fn events(f: impl FnOnce(&mut dyn WriteColor) -> Result<()>) -> Vec<Value> {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_extracted_event() {
        let reporter = JsonReporter::new();
        let events = events(|w| reporter.extracted(Path::new("in.csv"), &sample(), w));

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event["stage"], "read");
        assert_eq!(event["path"], "in.csv");
        assert_eq!(event["rows"], 2);
        assert_eq!(event["columns"][1], json!({"name": "salary", "type": "float"}));
        assert_eq!(
            event["records"][1],
            json!({"department": "HR", "salary": 40000.2, "age": null})
        );
    }

    #[test]
    fn test_transformed_event_carries_report() {
        let reporter = JsonReporter::new();
        let cleaned = clean(&sample()).unwrap();
        let events = events(|w| reporter.transformed(&cleaned, w));

        let event = &events[0];
        assert_eq!(event["stage"], "clean");
        assert_eq!(event["report"]["rows_dropped"], 0);
        assert_eq!(event["report"]["values_truncated"], 2);
        assert_eq!(
            event["report"]["imputed"][0],
            json!({"column": "age", "strategy": "mean", "fill": 30.0, "filled": 1})
        );
        assert_eq!(event["records"][1]["salary"], 40000);
        assert!(event.get("path").is_none());
    }

    #[test]
    fn test_loaded_event() {
        let reporter = JsonReporter::new();
        let events = events(|w| reporter.loaded(Path::new("out.csv"), &sample(), w));

        assert_eq!(events[0], json!({"stage": "write", "path": "out.csv", "rows": 2}));
    }
}
