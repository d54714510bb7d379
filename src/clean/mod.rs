//! Cleaner stage: row filter, gap fill, and salary normalization
//!
//! The steps always run in this order:
//!
//! 1. drop every row missing `department` or `salary`
//! 2. impute absent `age` values with the mean of the surviving ages
//! 3. truncate every `salary` toward zero into a whole number
//!
//! The input table is never modified; [`Cleaner::clean`] returns a new one.

mod filter;
mod impute;
mod normalize;

use serde::Serialize;
use tracing::info;

use crate::error::{EtlError, Result};
use crate::model::Table;

pub use filter::drop_incomplete;
pub use impute::{ImputeOutcome, ImputeStrategy, Imputation};
pub use normalize::{to_whole_numbers, truncate_to_i64};

pub const DEPARTMENT: &str = "department";
pub const SALARY: &str = "salary";
pub const AGE: &str = "age";

/// Summary of what a clean pass changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_dropped: usize,
    pub rows_out: usize,
    pub imputed: Vec<ImputeOutcome>,
    pub values_truncated: usize,
}

/// A cleaned table together with its report
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub table: Table,
    pub report: CleanReport,
}

/// Fixed set of cleaning rules for one table shape
#[derive(Debug, Clone)]
pub struct Cleaner {
    required: Vec<String>,
    imputations: Vec<Imputation>,
    whole_numbers: Vec<String>,
}

impl Cleaner {
    /// Rules that drop rows missing any `required` column, fill gaps per
    /// `imputations`, then truncate the `whole_numbers` columns.
    pub fn new(required: Vec<String>, imputations: Vec<Imputation>, whole_numbers: Vec<String>) -> Self {
        Self {
            required,
            imputations,
            whole_numbers,
        }
    }

    /// Rules for employee records
    pub fn employees() -> Self {
        Self::new(
            vec![DEPARTMENT.to_string(), SALARY.to_string()],
            vec![Imputation::mean(AGE)],
            vec![SALARY.to_string()],
        )
    }

    /// Run the filter, imputation, and normalization steps over `table`
    pub fn clean(&self, table: &Table) -> Result<Cleaned> {
        let required = self
            .required
            .iter()
            .map(|name| require_column(table, name))
            .collect::<Result<Vec<_>>>()?;
        let imputed_columns = self
            .imputations
            .iter()
            .map(|imp| require_column(table, &imp.column))
            .collect::<Result<Vec<_>>>()?;
        let whole_columns = self
            .whole_numbers
            .iter()
            .map(|name| require_column(table, name))
            .collect::<Result<Vec<_>>>()?;

        let (mut rows, rows_dropped) = drop_incomplete(&table.rows, &required);

        let mut imputed = Vec::with_capacity(self.imputations.len());
        for (imputation, &idx) in self.imputations.iter().zip(&imputed_columns) {
            imputed.push(imputation.apply(&mut rows, idx)?);
        }

        let mut values_truncated = 0;
        for (name, &idx) in self.whole_numbers.iter().zip(&whole_columns) {
            values_truncated += to_whole_numbers(&mut rows, idx, name)?;
        }

        let cleaned = table.with_rows(rows);
        let report = CleanReport {
            rows_in: table.row_count(),
            rows_dropped,
            rows_out: cleaned.row_count(),
            imputed,
            values_truncated,
        };

        info!(
            rows_in = report.rows_in,
            rows_dropped = report.rows_dropped,
            rows_out = report.rows_out,
            values_truncated = report.values_truncated,
            "cleaned table"
        );

        Ok(Cleaned {
            table: cleaned,
            report,
        })
    }
}

fn require_column(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| EtlError::MissingColumn(name.to_string()))
}

/// Clean an employee table with the standard rules
pub fn clean(table: &Table) -> Result<Cleaned> {
    Cleaner::employees().clean(table)
}
