//! Turns the raw text columns of a loaded frame into typed, gap-free columns.

use crate::processing::error::ProcessDataError;
use crate::types::columns::{CALENDAR_COLUMNS, DATE, MEASUREMENT_COLUMNS};
use polars::prelude::*;

/// Parses one raw cell of a numeric column.
///
/// Numbers parse as themselves. Cells carrying alphabetic codes instead of a
/// number become `0.0`. Blank and otherwise unparseable cells are missing.
pub fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || matches!(cell.to_ascii_lowercase().as_str(), "nan" | "na" | "n/a") {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ if cell.chars().any(|c| c.is_ascii_alphabetic()) => Some(0.0),
        _ => None,
    }
}

/// Parses a column cell by cell and forward-fills the gaps.
fn clean_column(df: &DataFrame, name: &str) -> Result<Series, ProcessDataError> {
    let column = df
        .column(name)
        .map_err(|e| ProcessDataError::ColumnNotFound(name.to_string(), e))?;
    let op_err = |e| ProcessDataError::ColumnOperation {
        column: name.to_string(),
        source: e,
    };

    let text = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(op_err)?;
    let parsed: Float64Chunked = text
        .str()
        .map_err(op_err)?
        .into_iter()
        .map(|cell| cell.and_then(parse_cell))
        .collect();

    parsed
        .with_name(name.into())
        .into_series()
        .fill_null(FillNullStrategy::Forward(None))
        .map_err(op_err)
}

/// Cleans every numeric column of `df` in place.
///
/// Measurement columns end up as `Float64`, calendar columns as `Int32`.
/// Missing cells take the value of the previous row, dates included; a gap at
/// the top of a column has nothing to copy from and stays missing.
pub fn clean_frame(df: &mut DataFrame) -> Result<(), ProcessDataError> {
    let dates = df
        .column(DATE)
        .map_err(|e| ProcessDataError::ColumnNotFound(DATE.to_string(), e))?
        .as_materialized_series()
        .fill_null(FillNullStrategy::Forward(None))
        .map_err(|e| ProcessDataError::ColumnOperation {
            column: DATE.to_string(),
            source: e,
        })?;
    df.with_column(dates)?;

    for name in MEASUREMENT_COLUMNS {
        let cleaned = clean_column(df, name)?;
        df.with_column(cleaned)?;
    }
    for name in CALENDAR_COLUMNS {
        let cleaned = clean_column(df, name)?
            .cast(&DataType::Int32)
            .map_err(|e| ProcessDataError::ColumnOperation {
                column: name.to_string(),
                source: e,
            })?;
        df.with_column(cleaned)?;
    }
    Ok(())
}
