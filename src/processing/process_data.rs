//! The train/test dataset builder: loads yearly files, cleans them, derives
//! features and renders the plots of the processed data.

use crate::plotting::bar_chart::plot_bin_counts;
use crate::plotting::time_series::plot_time_series;
use crate::processing::binning::{add_bin_column, BinCount};
use crate::processing::cleaning::clean_frame;
use crate::processing::csv_loader::{empty_frame, read_year_csv, rows_to_read};
use crate::processing::error::ProcessDataError;
use crate::processing::extractor::{dated_values, extract_records, int_values};
use crate::processing::features::{add_previous_max_temp, add_scaled_max_temp, ColumnStats};
use crate::processing::filtering::WeatherFrameFilterExt;
use crate::types::columns::{MAX_TEMP, MINMAX_SCALED_MAX_TEMP, YEAR, ZSCALED_MAX_TEMP};
use crate::types::station::Station;
use crate::types::weather_record::WeatherRecord;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Holds the training and test frames of one station and runs every
/// processing step on them.
///
/// The test frame holds exactly one year, the train frame every other year
/// of the loaded range in year order. Steps are meant to be called in order:
/// [`load_data`](Self::load_data), [`clean_loaded_data`](Self::clean_loaded_data),
/// [`create_new_variable`](Self::create_new_variable), then any of the
/// plotting, normalization and binning steps.
///
/// # Examples
///
/// ```no_run
/// # use weather_predictor::ProcessData;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut data = ProcessData::builder()
///     .data_dir("calgary_weather_data")
///     .build();
/// data.load_data(2010, 2020, 2019)?;
/// data.clean_loaded_data()?;
/// data.create_new_variable()?;
/// data.plot_column_data(2020, "Max Temp (°C)")?;
/// # Ok(())
/// # }
/// ```
pub struct ProcessData {
    data_dir: PathBuf,
    station: Station,
    plot_dir: PathBuf,
    today: NaiveDate,
    test_year: Option<i32>,
    train: DataFrame,
    test: DataFrame,
}

#[bon]
impl ProcessData {
    /// Creates an empty `ProcessData` reading yearly files from `data_dir`.
    ///
    /// * `.data_dir(PathBuf)`: **Required.** Directory holding the yearly CSV files.
    /// * `.station(Station)`: Optional. Station whose files are read. Defaults to Calgary.
    /// * `.plot_dir(PathBuf)`: Optional. Where plots are written. Defaults to `.`.
    /// * `.today(NaiveDate)`: Optional. Reference date for truncating the current
    ///   year. Defaults to the local date.
    #[builder]
    pub fn new(
        #[builder(into)] data_dir: PathBuf,
        station: Option<Station>,
        #[builder(into)] plot_dir: Option<PathBuf>,
        today: Option<NaiveDate>,
    ) -> Self {
        Self {
            data_dir,
            station: station.unwrap_or_default(),
            plot_dir: plot_dir.unwrap_or_else(|| PathBuf::from(".")),
            today: today.unwrap_or_else(|| Local::now().date_naive()),
            test_year: None,
            train: DataFrame::empty(),
            test: DataFrame::empty(),
        }
    }

    /// Replaces both frames, e.g. with frames built in memory.
    pub fn with_frames(mut self, train: DataFrame, test: DataFrame, test_year: Option<i32>) -> Self {
        self.train = train;
        self.test = test;
        self.test_year = test_year;
        self
    }

    pub fn train(&self) -> &DataFrame {
        &self.train
    }

    pub fn test(&self) -> &DataFrame {
        &self.test
    }

    pub fn test_year(&self) -> Option<i32> {
        self.test_year
    }

    pub fn plot_dir(&self) -> &Path {
        &self.plot_dir
    }

    /// Local path of the file holding `year`.
    pub fn file_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(self.station.file_name(year))
    }

    /// Loads every year of `start_year..=end_year`.
    ///
    /// `test_year` goes to the test frame, all other years are appended to the
    /// train frame in year order. A test year outside the range leaves the
    /// test frame empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDataError::InvalidYearRange`] if `start_year > end_year`,
    /// and [`ProcessDataError::CsvOpen`] / [`ProcessDataError::CsvRead`] if a
    /// yearly file is missing or malformed.
    pub fn load_data(
        &mut self,
        start_year: i32,
        end_year: i32,
        test_year: i32,
    ) -> Result<(), ProcessDataError> {
        if start_year > end_year {
            return Err(ProcessDataError::InvalidYearRange {
                start: start_year,
                end: end_year,
            });
        }
        if !(start_year..=end_year).contains(&test_year) {
            warn!(
                "Test year {} is outside {}..={}, the test set will be empty",
                test_year, start_year, end_year
            );
        }

        let mut train: Option<DataFrame> = None;
        let mut test: Option<DataFrame> = None;

        for year in start_year..=end_year {
            let path = self.file_path(year);
            let df = read_year_csv(&path, rows_to_read(year, self.today))?;
            debug!("Loaded {} rows for {} from {:?}", df.height(), year, path);

            if year == test_year {
                test = Some(df);
            } else {
                train = match train {
                    None => Some(df),
                    Some(mut acc) => {
                        acc.vstack_mut(&df)?;
                        Some(acc)
                    }
                };
            }
        }

        self.train = match train {
            Some(df) => df,
            None => empty_frame()?,
        };
        self.test = match test {
            Some(df) => df,
            None => empty_frame()?,
        };
        self.test_year = Some(test_year);

        info!("Train columns: {:?}", self.train.get_column_names());
        info!(
            "Loaded {} train rows and {} test rows",
            self.train.height(),
            self.test.height()
        );
        info!("{}", self.train.head(Some(10)));
        Ok(())
    }

    /// Parses the numeric columns of both frames and forward-fills missing values.
    pub fn clean_loaded_data(&mut self) -> Result<(), ProcessDataError> {
        clean_frame(&mut self.train)?;
        clean_frame(&mut self.test)?;
        Ok(())
    }

    /// Adds the previous day's max temperature to both frames.
    pub fn create_new_variable(&mut self) -> Result<(), ProcessDataError> {
        add_previous_max_temp(&mut self.train)?;
        add_previous_max_temp(&mut self.test)?;
        Ok(())
    }

    /// Rows of `df` recorded in `year`.
    pub fn filter_by_year(df: &DataFrame, year: i32) -> Result<DataFrame, ProcessDataError> {
        Ok(df.clone().lazy().filter_by_year(year).collect()?)
    }

    /// The rows to plot for `year`: the whole test frame if it holds that
    /// year, otherwise that year's train rows.
    fn year_frame(&self, year: i32) -> Result<DataFrame, ProcessDataError> {
        let in_test = self.test.height() > 0
            && int_values(&self.test, YEAR)?.contains(&Some(year));
        let frame = if in_test {
            self.test.clone()
        } else {
            Self::filter_by_year(&self.train, year)?
        };

        if frame.height() == 0 {
            return Err(ProcessDataError::YearNotLoaded(year));
        }
        Ok(frame)
    }

    /// Plots `column` against the date for one year and returns the image path.
    pub fn plot_column_data(&self, year: i32, column: &str) -> Result<PathBuf, ProcessDataError> {
        let frame = self.year_frame(year)?;
        let points = dated_values(&frame, column)?;
        let path = plot_time_series(&points, column, year, &self.plot_dir)?;
        info!("Wrote {} plot for {} to {:?}", column, year, path);
        Ok(path)
    }

    /// Adds the z-score and min-max scaled max temperature to the train frame.
    pub fn scale_max_temp(&mut self) -> Result<(), ProcessDataError> {
        self.train = add_scaled_max_temp(std::mem::take(&mut self.train))?;
        Ok(())
    }

    /// Scales the train frame's max temperature and plots both scalings for `plot_year`.
    pub fn normalize_datasets(&mut self, plot_year: i32) -> Result<Vec<PathBuf>, ProcessDataError> {
        self.scale_max_temp()?;
        Ok(vec![
            self.plot_column_data(plot_year, ZSCALED_MAX_TEMP)?,
            self.plot_column_data(plot_year, MINMAX_SCALED_MAX_TEMP)?,
        ])
    }

    /// Labels each train row with its temperature bin and returns the label counts.
    pub fn bin_max_temp(&mut self) -> Result<Vec<BinCount>, ProcessDataError> {
        let counts = add_bin_column(&mut self.train)?;
        for count in &counts {
            debug!("{:>20}: {}", count.bin, count.count);
        }
        Ok(counts)
    }

    /// Bins the train frame's max temperature and renders the bar chart of the counts.
    pub fn binning_temps(&mut self) -> Result<(Vec<BinCount>, PathBuf), ProcessDataError> {
        let counts = self.bin_max_temp()?;
        let path = plot_bin_counts(&counts, &self.plot_dir)?;
        info!("Wrote temperature bin plot to {:?}", path);
        Ok((counts, path))
    }

    /// Statistics of the train frame's max temperature.
    pub fn max_temp_stats(&self) -> Result<Option<ColumnStats>, ProcessDataError> {
        ColumnStats::from_column(&self.train, MAX_TEMP)
    }

    pub fn train_records(&self) -> Result<Vec<WeatherRecord>, ProcessDataError> {
        extract_records(&self.train)
    }

    pub fn test_records(&self) -> Result<Vec<WeatherRecord>, ProcessDataError> {
        extract_records(&self.test)
    }
}
