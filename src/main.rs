//! tabclean - batch cleaner for employee records

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use tabclean::config::{Config, ReportFormat, DEFAULT_INPUT, DEFAULT_OUTPUT};
use tabclean::logging;
use tabclean::pipeline;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Terminal,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(f: CliReportFormat) -> Self {
        match f {
            CliReportFormat::Terminal => ReportFormat::Terminal,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(c: CliColor) -> Self {
        match c {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

/// Clean employee records: drop incomplete rows, impute ages, truncate salaries
#[derive(Parser, Debug)]
#[command(name = "tabclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file (comma-separated, with header)
    #[arg(short, long, env = "TABCLEAN_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output file, created or replaced
    #[arg(short, long, env = "TABCLEAN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Format of the stage confirmations on stdout
    #[arg(short, long, value_enum, env = "TABCLEAN_FORMAT", default_value = "terminal")]
    format: CliReportFormat,

    /// When to color terminal confirmations
    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.input, cli.output)
        .with_report_format(cli.format.into())
        .with_color(cli.color.into());

    pipeline::run(&config)?;
    Ok(())
}
