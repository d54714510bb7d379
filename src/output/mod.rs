//! Console confirmations emitted after each pipeline stage

mod json;
mod terminal;

use std::path::Path;

use termcolor::WriteColor;

use crate::clean::Cleaned;
use crate::config::ReportFormat;
use crate::error::Result;
use crate::model::Table;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

/// Renders one confirmation per stage
pub trait StageReporter {
    /// After the reader loaded `table` from `path`
    fn extracted(&self, path: &Path, table: &Table, writer: &mut dyn WriteColor) -> Result<()>;

    /// After the cleaner produced `cleaned`
    fn transformed(&self, cleaned: &Cleaned, writer: &mut dyn WriteColor) -> Result<()>;

    /// After the writer saved `table` to `path`
    fn loaded(&self, path: &Path, table: &Table, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating stage reporters
pub struct ReporterFactory;

impl ReporterFactory {
    /// Create a reporter for the given format
    pub fn create(format: ReportFormat) -> Box<dyn StageReporter> {
        match format {
            ReportFormat::Terminal => Box::new(TerminalReporter::new()),
            ReportFormat::Json => Box::new(JsonReporter::new()),
        }
    }
}
