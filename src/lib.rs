//! Downloads daily climate records of a weather station, splits them into
//! train and test datasets, cleans them, derives temperature features and
//! plots the result.

mod download;
mod error;
mod pipeline;
mod plotting;
mod processing;
mod types;
mod utils;

pub use error::WeatherPredictorError;
pub use pipeline::*;

pub use download::downloader::WeatherDownloader;
pub use download::error::DownloadError;

pub use processing::binning::{bin_values, count_bins, BinCount};
pub use processing::error::ProcessDataError;
pub use processing::features::{lag_with_first_fill, ColumnStats};
pub use processing::filtering::WeatherFrameFilterExt;
pub use processing::process_data::ProcessData;

pub use plotting::bar_chart::plot_bin_counts;
pub use plotting::error::PlotError;
pub use plotting::time_series::plot_time_series;

pub use types::columns;
pub use types::station::{Station, DEFAULT_BULK_DATA_URL};
pub use types::temperature_bin::TemperatureBin;
pub use types::weather_record::WeatherRecord;
