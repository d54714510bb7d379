//! Whole-number normalization by truncation toward zero

use crate::error::{EtlError, Result};
use crate::model::{CellValue, Row};

/// Truncate a float toward zero, rejecting values with no `i64` counterpart
pub fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MIN as f64 is exact; i64::MAX as f64 rounds up to 2^63
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Convert every cell of column `idx` to an integer.
///
/// Every cell is rewritten in canonical form, so source spellings such as
/// `050000` are not carried through. Returns how many float cells were
/// converted.
pub fn to_whole_numbers(rows: &mut [Row], idx: usize, column: &str) -> Result<usize> {
    let mut converted = 0;

    for row in rows.iter_mut() {
        let whole = match row.get(idx) {
            None => continue,
            Some(CellValue::Int(i)) => Some(*i),
            Some(CellValue::Float(f)) => {
                converted += 1;
                truncate_to_i64(*f)
            }
            Some(_) => None,
        };

        match whole {
            Some(i) => row.set(idx, CellValue::Int(i)),
            None => {
                return Err(EtlError::Conversion {
                    column: column.to_string(),
                    value: row.get(idx).map(|c| c.display().into_owned()).unwrap_or_default(),
                    line: row.source_line,
                    target: "integer",
                })
            }
        }
    }

    Ok(converted)
}
