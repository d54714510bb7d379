//! Human-readable terminal confirmations

use std::io::Write;
use std::path::Path;

use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::clean::{CleanReport, Cleaned, ImputeOutcome};
use crate::error::Result;
use crate::model::Table;

use super::StageReporter;

/// Rows shown before the preview is cut off
const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Terminal output with colored headings and a bordered table preview
pub struct TerminalReporter {
    preview_rows: usize,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_preview_rows(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    fn write_heading(&self, writer: &mut dyn WriteColor, text: &str) -> Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(writer, "✅ {}", text)?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_table(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        if table.column_count() == 0 {
            return Ok(());
        }

        let mut builder = Builder::default();
        builder.push_record(table.column_names().map(str::to_string));
        for row in table.rows.iter().take(self.preview_rows) {
            builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
        }

        let mut grid = builder.build();
        grid.with(Style::modern());
        writeln!(writer, "{}", grid)?;

        let hidden = table.row_count().saturating_sub(self.preview_rows);
        if hidden > 0 {
            writeln!(writer, "… {} more rows", hidden)?;
        }
        writeln!(
            writer,
            "[{} rows x {} columns]",
            table.row_count(),
            table.column_count()
        )?;
        Ok(())
    }

    fn write_report(&self, report: &CleanReport, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(
            writer,
            "  dropped {} of {} rows missing required fields",
            report.rows_dropped, report.rows_in
        )?;
        for outcome in &report.imputed {
            self.write_imputation(outcome, writer)?;
        }
        writeln!(
            writer,
            "  truncated {} values to whole numbers",
            report.values_truncated
        )?;
        Ok(())
    }

    fn write_imputation(&self, outcome: &ImputeOutcome, writer: &mut dyn WriteColor) -> Result<()> {
        match outcome.fill {
            Some(fill) => writeln!(
                writer,
                "  {}: filled {} missing values with {} {}",
                outcome.column, outcome.filled, outcome.strategy, fill
            )?,
            None => {
                writer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                write!(
                    writer,
                    "  {}: no values present, {} undefined, left unfilled",
                    outcome.column, outcome.strategy
                )?;
                writer.reset()?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageReporter for TerminalReporter {
    fn extracted(&self, path: &Path, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_heading(writer, &format!("Extracted Data ({})", path.display()))?;
        self.write_table(table, writer)
    }

    fn transformed(&self, cleaned: &Cleaned, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_heading(writer, "Transformed Data")?;
        self.write_report(&cleaned.report, writer)?;
        self.write_table(&cleaned.table, writer)
    }

    fn loaded(&self, path: &Path, _table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_heading(writer, &format!("Cleaned data saved to {}", path.display()))
    }
}
