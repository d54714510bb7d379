//! Computed-default imputation for numeric columns

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EtlError, Result};
use crate::model::{CellValue, Row};

/// How the fill value for a column is derived from its present values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeStrategy {
    Mean,
    Median,
    Zero,
}

impl ImputeStrategy {
    /// Fill value for the given present values, or `None` when it is undefined
    pub fn fill_value(self, values: &[f64]) -> Option<f64> {
        match self {
            ImputeStrategy::Zero => Some(0.0),
            _ if values.is_empty() => None,
            ImputeStrategy::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            ImputeStrategy::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    Some((sorted[mid - 1] + sorted[mid]) / 2.0)
                } else {
                    Some(sorted[mid])
                }
            }
        }
    }
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImputeStrategy::Mean => write!(f, "mean"),
            ImputeStrategy::Median => write!(f, "median"),
            ImputeStrategy::Zero => write!(f, "zero"),
        }
    }
}

/// Fill absent values of one column using a strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imputation {
    pub column: String,
    pub strategy: ImputeStrategy,
}

impl Imputation {
    pub fn new(column: impl Into<String>, strategy: ImputeStrategy) -> Self {
        Self {
            column: column.into(),
            strategy,
        }
    }

    /// Mean imputation of `column`
    pub fn mean(column: impl Into<String>) -> Self {
        Self::new(column, ImputeStrategy::Mean)
    }

    /// Compute the fill value over `rows` and apply it to every absent cell
    /// in column `idx`. The fill value is fixed before any cell is touched.
    pub fn apply(&self, rows: &mut [Row], idx: usize) -> Result<ImputeOutcome> {
        let mut present = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            match row.get(idx) {
                None | Some(CellValue::Null) => {}
                Some(value) => present.push(value.as_f64().ok_or_else(|| EtlError::Conversion {
                    column: self.column.clone(),
                    value: value.display().into_owned(),
                    line: row.source_line,
                    target: "number",
                })?),
            }
        }

        let Some(fill) = self.strategy.fill_value(&present) else {
            warn!(
                column = %self.column,
                strategy = %self.strategy,
                "no values present, leaving column unfilled"
            );
            return Ok(ImputeOutcome {
                column: self.column.clone(),
                strategy: self.strategy,
                fill: None,
                filled: 0,
            });
        };

        let mut filled = 0;
        for row in rows.iter_mut() {
            if idx < row.cells.len() && row.is_absent(idx) {
                row.set(idx, CellValue::Float(fill));
                filled += 1;
                debug!(line = row.source_line, column = %self.column, fill, "imputed value");
            }
        }

        Ok(ImputeOutcome {
            column: self.column.clone(),
            strategy: self.strategy,
            fill: Some(fill),
            filled,
        })
    }
}

/// What an imputation did to its column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputeOutcome {
    pub column: String,
    pub strategy: ImputeStrategy,
    /// `None` when the fill value was undefined and nothing was filled
    pub fill: Option<f64>,
    pub filled: usize,
}
