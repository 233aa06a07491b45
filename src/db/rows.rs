//! Row-set materialization.

use std::collections::BTreeMap;

use sqlx::any::AnyRow;
use sqlx::{Column, Row, ValueRef};

use crate::error::Error;

/// 1-based row index → column name → value rendered as text.
pub type RowMapping = BTreeMap<usize, BTreeMap<String, String>>;

/// Rendering of a NULL cell.
const NULL: &str = "NULL";

/// Stringifies every cell of `rows`.
///
/// Typing is lost on purpose: numbers, booleans and blobs all come back as
/// text, and callers re-parse what they need.
pub fn to_row_mapping(rows: &[AnyRow]) -> Result<RowMapping, Error> {
    let mut mapping = RowMapping::new();
    for (index, row) in rows.iter().enumerate() {
        let mut record = BTreeMap::new();
        for column in row.columns() {
            record.insert(column.name().to_owned(), cell_text(row, column.ordinal())?);
        }
        mapping.insert(index + 1, record);
    }
    Ok(mapping)
}

/// Value of `column` in the first row, or an empty string.
pub fn first_row_value(rows: &[AnyRow], column: &str) -> Result<String, Error> {
    let mapping = to_row_mapping(rows)?;
    Ok(mapping
        .get(&1)
        .and_then(|record| record.get(column))
        .cloned()
        .unwrap_or_default())
}

fn cell_text(row: &AnyRow, index: usize) -> Result<String, Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(NULL.to_owned());
    }
    let text = row
        .try_get::<String, _>(index)
        .or_else(|_| row.try_get::<i64, _>(index).map(|v| v.to_string()))
        .or_else(|_| row.try_get::<f64, _>(index).map(|v| v.to_string()))
        .or_else(|_| row.try_get::<bool, _>(index).map(|v| v.to_string()))
        .or_else(|_| {
            row.try_get::<Vec<u8>, _>(index)
                .map(|v| String::from_utf8_lossy(&v).into_owned())
        })?;
    Ok(text)
}
