//! Data model for employee tables

mod schema;
mod table;

pub use schema::{CellType, Column};
pub use table::{CellValue, Row, Table};
