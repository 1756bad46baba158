use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessDataError {
    #[error("Invalid year range: start year {start} is after end year {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Failed to open yearly data file '{0}'")]
    CsvOpen(PathBuf, #[source] PolarsError),

    #[error("Parsing error reading yearly data file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed Polars column operation on '{column}': {source}")]
    ColumnOperation {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Invalid date '{value}' in row {row}")]
    InvalidDate { value: String, row: usize },

    #[error("No rows found for year {0}")]
    YearNotLoaded(i32),

    #[error("No max temperature values available for binning")]
    NothingToBin,

    #[error(transparent)]
    Plot(#[from] crate::plotting::error::PlotError),
}
