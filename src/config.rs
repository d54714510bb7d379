//! Configuration handling for tabclean

use std::path::PathBuf;

use termcolor::ColorChoice;

pub const DEFAULT_INPUT: &str = "input/employees.csv";
pub const DEFAULT_OUTPUT: &str = "output/cleaned_employees.csv";

/// Format of the per-stage console confirmations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Delimited text file to read
    pub input: PathBuf,
    /// Destination of the cleaned table
    pub output: PathBuf,
    /// Console confirmation format
    pub report_format: ReportFormat,
    /// Whether terminal confirmations use color
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            report_format: ReportFormat::default(),
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    /// Set report format
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Set color choice for terminal reports
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}
