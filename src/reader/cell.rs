//! Cell-level type inference for delimited text

use std::borrow::Cow;

use crate::model::CellValue;

/// Tokens read as an absent value
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse a string value into a CellValue with type inference
pub fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed) {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Any spelling of NaN is absent; infinities stay as text
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_nan() => return CellValue::Null,
        Ok(f) if f.is_finite() => return CellValue::Float(f),
        _ => {}
    }

    CellValue::String(Cow::Owned(trimmed.to_string()))
}
