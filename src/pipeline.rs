//! Driver: read → clean → write, aborting on the first failure

use std::fmt;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};
use thiserror::Error;
use tracing::{info, info_span};

use crate::clean::{CleanReport, Cleaner};
use crate::config::Config;
use crate::error::EtlError;
use crate::output::{ReporterFactory, StageReporter};
use crate::{reader, writer};

/// Pipeline stage, used to label failures and report events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Read,
    Clean,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::Clean => write!(f, "clean"),
            Stage::Write => write!(f, "write"),
        }
    }
}

/// A stage error, tagged with the stage that raised it
#[derive(Error, Debug)]
#[error("{stage} stage failed")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: EtlError,
}

fn at(stage: Stage) -> impl FnOnce(EtlError) -> PipelineError {
    move |source| PipelineError { stage, source }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: CleanReport,
}

/// One configured read → clean → write run
pub struct Pipeline {
    config: Config,
    cleaner: Cleaner,
    reporter: Box<dyn StageReporter>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let reporter = ReporterFactory::create(config.report_format);
        Self {
            config,
            cleaner: Cleaner::employees(),
            reporter,
        }
    }

    /// Run all three stages, writing confirmations to `out`.
    ///
    /// The output file is only touched once reading and cleaning succeeded.
    pub fn run(&self, out: &mut dyn WriteColor) -> Result<RunSummary, PipelineError> {
        let input = &self.config.input;
        let output = &self.config.output;
        let _span = info_span!("pipeline", input = %input.display(), output = %output.display())
            .entered();

        let table = reader::read(input).map_err(at(Stage::Read))?;
        self.reporter
            .extracted(input, &table, out)
            .map_err(at(Stage::Read))?;

        let cleaned = self.cleaner.clean(&table).map_err(at(Stage::Clean))?;
        self.reporter
            .transformed(&cleaned, out)
            .map_err(at(Stage::Clean))?;

        writer::write(&cleaned.table, output).map_err(at(Stage::Write))?;
        self.reporter
            .loaded(output, &cleaned.table, out)
            .map_err(at(Stage::Write))?;

        info!(
            rows_in = cleaned.report.rows_in,
            rows_out = cleaned.report.rows_out,
            "pipeline finished"
        );

        Ok(RunSummary {
            input: input.clone(),
            output: output.clone(),
            report: cleaned.report,
        })
    }
}

/// Run the pipeline described by `config`, reporting to stdout
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let color = match config.color {
        ColorChoice::Auto if !io::stdout().is_terminal() => ColorChoice::Never,
        choice => choice,
    };
    let mut stdout = StandardStream::stdout(color);
    Pipeline::new(config.clone()).run(&mut stdout)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::fs;

    use termcolor::NoColor;

    use super::*;
    use crate::config::ReportFormat;

    const INPUT: &str = "department,salary,age\nEng,50000.7,30\n,60000,\nHR,40000.2,\n";

    fn run_captured(config: Config) -> (Result<RunSummary, PipelineError>, String) {
        let mut out = NoColor::new(Vec::new());
        let result = Pipeline::new(config).run(&mut out);
        (result, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("employees.csv");
        let output = dir.path().join("cleaned.csv");
        fs::write(&input, INPUT).unwrap();

        let (result, console) = run_captured(Config::new(&input, &output));
        let summary = result.unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "department,salary,age\nEng,50000,30\nHR,40000,30\n"
        );
        assert_eq!(summary.report.rows_dropped, 1);
        assert!(console.contains("Extracted Data"));
        assert!(console.contains("Transformed Data"));
        assert!(console.contains(&format!("Cleaned data saved to {}", output.display())));
    }

    #[test]
    fn test_missing_input_fails_in_read_stage() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cleaned.csv");

        let (result, console) = run_captured(Config::new(dir.path().join("nope.csv"), &output));
        let err = result.unwrap_err();

        assert_eq!(err.stage, Stage::Read);
        assert!(matches!(err.source, EtlError::NotFound { .. }));
        assert!(err.source().is_some());
        assert!(console.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_failure_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("employees.csv");
        let output = dir.path().join("cleaned.csv");
        fs::write(&input, "department,salary,age\nEng,lots,30\n").unwrap();
        fs::write(&output, "previous\n").unwrap();

        let (result, _) = run_captured(Config::new(&input, &output));
        let err = result.unwrap_err();

        assert_eq!(err.stage, Stage::Clean);
        assert_eq!(err.to_string(), "clean stage failed");
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[test]
    fn test_unwritable_output_fails_in_write_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("employees.csv");
        fs::write(&input, INPUT).unwrap();

        let config = Config::new(&input, dir.path().join("missing").join("cleaned.csv"));
        let (result, _) = run_captured(config);

        assert_eq!(result.unwrap_err().stage, Stage::Write);
    }

    #[test]
    fn test_json_report_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("employees.csv");
        let output = dir.path().join("cleaned.csv");
        fs::write(&input, INPUT).unwrap();

        let config = Config::new(&input, &output).with_report_format(ReportFormat::Json);
        let (result, console) = run_captured(config);
        result.unwrap();

        let stages: Vec<String> = console
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["stage"].to_string())
            .collect();
        assert_eq!(stages, ["\"read\"", "\"clean\"", "\"write\""]);
    }
}
