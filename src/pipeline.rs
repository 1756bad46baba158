//! The end-to-end run: download the yearly files of a station, build the
//! train/test datasets, derive features, render plots and write a summary.

use crate::download::downloader::WeatherDownloader;
use crate::error::WeatherPredictorError;
use crate::processing::binning::BinCount;
use crate::processing::error::ProcessDataError;
use crate::processing::features::ColumnStats;
use crate::processing::process_data::ProcessData;
use crate::types::columns::MAX_TEMP;
use crate::types::station::Station;
use crate::utils::ensure_dir_exists;
use bon::bon;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SUMMARY_FILE_NAME: &str = "summary.json";

const DEFAULT_START_YEAR: i32 = 2010;
const DEFAULT_TEST_YEAR: i32 = 2019;
const DEFAULT_PLOT_YEAR: i32 = 2020;
const DEFAULT_DATA_DIR: &str = "calgary_weather_data";

/// Outcome of a pipeline run, also written to `summary.json` in the plot directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub station: Station,
    pub start_year: i32,
    pub end_year: i32,
    pub test_year: i32,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Statistics of the train set's max temperature after cleaning.
    pub max_temp: Option<ColumnStats>,
    pub bin_counts: Vec<BinCount>,
    pub plots: Vec<PathBuf>,
}

/// Configuration and entry point of a full run.
///
/// # Examples
///
/// ```no_run
/// # use weather_predictor::{WeatherPipeline, WeatherPredictorError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherPredictorError> {
/// let pipeline = WeatherPipeline::builder()
///     .start_year(2015)
///     .test_year(2019)
///     .plot_year(2020)
///     .build()?;
/// let summary = pipeline.run().await?;
/// println!("{} training days", summary.train_rows);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherPipeline {
    station: Station,
    start_year: i32,
    end_year: i32,
    test_year: i32,
    plot_year: i32,
    data_dir: PathBuf,
    plot_dir: PathBuf,
    today: NaiveDate,
    download: bool,
    render_plots: bool,
}

#[bon]
impl WeatherPipeline {
    /// Creates a pipeline.
    ///
    /// * `.start_year(i32)`: first year to load. Defaults to 2010.
    /// * `.end_year(i32)`: last year to load. Defaults to the current year.
    /// * `.test_year(i32)`: year held out as test set. Defaults to 2019.
    /// * `.plot_year(i32)`: year plotted. Defaults to 2020.
    /// * `.data_dir(PathBuf)`: where yearly files live. Defaults to `./calgary_weather_data`.
    /// * `.plot_dir(PathBuf)`: where plots and the summary go. Defaults to `.`.
    /// * `.station(Station)`: defaults to Calgary International.
    /// * `.today(NaiveDate)`: reference date. Defaults to the local date.
    /// * `.download(bool)`: fetch files before processing. Defaults to `true`.
    /// * `.render_plots(bool)`: write PNG plots. Defaults to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherPredictorError::InvalidConfig`] if the start year is after the end year.
    #[builder]
    pub fn new(
        start_year: Option<i32>,
        end_year: Option<i32>,
        test_year: Option<i32>,
        plot_year: Option<i32>,
        #[builder(into)] data_dir: Option<PathBuf>,
        #[builder(into)] plot_dir: Option<PathBuf>,
        station: Option<Station>,
        today: Option<NaiveDate>,
        download: Option<bool>,
        render_plots: Option<bool>,
    ) -> Result<Self, WeatherPredictorError> {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let start_year = start_year.unwrap_or(DEFAULT_START_YEAR);
        let end_year = end_year.unwrap_or(today.year());

        if start_year > end_year {
            return Err(WeatherPredictorError::InvalidConfig(format!(
                "start year {} is after end year {}",
                start_year, end_year
            )));
        }

        Ok(Self {
            station: station.unwrap_or_default(),
            start_year,
            end_year,
            test_year: test_year.unwrap_or(DEFAULT_TEST_YEAR),
            plot_year: plot_year.unwrap_or(DEFAULT_PLOT_YEAR),
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            plot_dir: plot_dir.unwrap_or_else(|| PathBuf::from(".")),
            today,
            download: download.unwrap_or(true),
            render_plots: render_plots.unwrap_or(true),
        })
    }

    /// Runs download, processing and plotting, then writes `summary.json`.
    pub async fn run(&self) -> Result<PipelineSummary, WeatherPredictorError> {
        ensure_dir_exists(&self.plot_dir)
            .await
            .map_err(|e| WeatherPredictorError::DirCreation(self.plot_dir.clone(), e))?;

        if self.download {
            let downloader = WeatherDownloader::builder()
                .station(self.station.clone())
                .build();
            downloader
                .download_range(self.start_year, self.end_year, &self.data_dir, self.today)
                .await?;
        } else {
            info!("Skipping download, using files in {:?}", self.data_dir);
        }

        let data = ProcessData::builder()
            .data_dir(self.data_dir.clone())
            .station(self.station.clone())
            .plot_dir(self.plot_dir.clone())
            .today(self.today)
            .build();

        // Polars work is CPU-bound and blocking.
        let pipeline = self.clone();
        let summary = tokio::task::spawn_blocking(move || pipeline.process(data)).await??;

        let summary_path = self.plot_dir.join(SUMMARY_FILE_NAME);
        let json =
            serde_json::to_vec_pretty(&summary).map_err(WeatherPredictorError::SummaryEncode)?;
        tokio::fs::write(&summary_path, json)
            .await
            .map_err(|e| WeatherPredictorError::SummaryWrite(summary_path.clone(), e))?;
        info!("Wrote run summary to {:?}", summary_path);

        Ok(summary)
    }

    fn process(&self, mut data: ProcessData) -> Result<PipelineSummary, ProcessDataError> {
        data.load_data(self.start_year, self.end_year, self.test_year)?;
        data.clean_loaded_data()?;
        data.create_new_variable()?;
        let max_temp = data.max_temp_stats()?;

        let mut plots = Vec::new();
        let bin_counts = if self.render_plots {
            plots.push(data.plot_column_data(self.plot_year, MAX_TEMP)?);
            plots.extend(data.normalize_datasets(self.plot_year)?);
            let (counts, path) = data.binning_temps()?;
            plots.push(path);
            counts
        } else {
            data.scale_max_temp()?;
            data.bin_max_temp()?
        };

        Ok(PipelineSummary {
            station: self.station.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            test_year: self.test_year,
            train_rows: data.train().height(),
            test_rows: data.test().height(),
            max_temp,
            bin_counts,
            plots,
        })
    }
}
