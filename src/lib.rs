//! tabclean - batch cleaner for employee records
//!
//! Reads a comma-separated file, drops rows missing `department` or
//! `salary`, fills absent `age` values with the mean age, truncates
//! `salary` to whole numbers, and writes the result back out.

pub mod clean;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use clean::{clean, CleanReport, Cleaned, Cleaner};
pub use config::Config;
pub use error::{EtlError, Result};
pub use model::Table;
pub use pipeline::{run, Pipeline, PipelineError, RunSummary, Stage};
pub use reader::read;
pub use writer::write;
