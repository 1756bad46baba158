//! Reads one year of daily climate records from disk.

use crate::processing::error::ProcessDataError;
use crate::types::columns::LOADED_COLUMNS;
use chrono::{Datelike, NaiveDate};
use log::debug;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Upper bound of rows in a yearly file (leap year).
pub const MAX_ROWS_PER_YEAR: usize = 366;

/// Number of rows to read from the file of `year`.
///
/// The file of the current year lists every day of the year, including days
/// that have not happened yet, so it is cut off at the days elapsed since
/// 1 January (today excluded).
pub fn rows_to_read(year: i32, today: NaiveDate) -> usize {
    if year != today.year() {
        return MAX_ROWS_PER_YEAR;
    }
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|jan_first| (today - jan_first).num_days().max(0) as usize)
        .unwrap_or(MAX_ROWS_PER_YEAR)
}

/// Reads the loaded columns of a yearly CSV file as text, keeping at most `n_rows` rows.
///
/// Every column is read as a string; numeric parsing happens during cleaning so
/// that flags and blanks in measurement columns never abort the load.
pub fn read_year_csv(path: &Path, n_rows: usize) -> Result<DataFrame, ProcessDataError> {
    let columns: Arc<[PlSmallStr]> = LOADED_COLUMNS.iter().map(|c| (*c).into()).collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_columns(Some(columns))
        .with_n_rows(Some(n_rows))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| ProcessDataError::CsvOpen(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| ProcessDataError::CsvRead(path.to_path_buf(), e))?;

    debug!("Read {} rows from {}", df.height(), path.display());

    df.select(LOADED_COLUMNS)
        .map_err(|e| ProcessDataError::CsvRead(path.to_path_buf(), e))
}

/// A frame with the loaded columns and no rows.
pub fn empty_frame() -> Result<DataFrame, ProcessDataError> {
    let columns = LOADED_COLUMNS
        .iter()
        .map(|name| Column::new((*name).into(), Vec::<String>::new()))
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}
