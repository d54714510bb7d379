//! Row filter: drops records missing required fields

use tracing::debug;

use crate::model::Row;

/// Keep only the rows where every column in `required` holds a value.
///
/// Returns the surviving rows and the number dropped.
pub fn drop_incomplete(rows: &[Row], required: &[usize]) -> (Vec<Row>, usize) {
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = 0;

    for row in rows {
        if required.iter().any(|&idx| row.is_absent(idx)) {
            debug!(line = row.source_line, "dropping incomplete row");
            dropped += 1;
        } else {
            kept.push(row.clone());
        }
    }

    (kept, dropped)
}
