//! Typed access to the columns of processed frames.

use crate::processing::error::ProcessDataError;
use crate::types::columns::{
    BIN, DATE, DAY, MAX_TEMP, MAX_TEMP_PREV, MEAN_TEMP, MINMAX_SCALED_MAX_TEMP, MIN_TEMP, MONTH,
    SNOW_ON_GROUND, TOTAL_PRECIP, YEAR, ZSCALED_MAX_TEMP,
};
use crate::types::temperature_bin::TemperatureBin;
use crate::types::weather_record::WeatherRecord;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessDataError> {
    df.column(name)
        .map_err(|e| ProcessDataError::ColumnNotFound(name.to_string(), e))
}

pub(crate) fn cast_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Series, ProcessDataError> {
    get_column(df, name)?
        .as_materialized_series()
        .cast(dtype)
        .map_err(|e| ProcessDataError::ColumnOperation {
            column: name.to_string(),
            source: e,
        })
}

/// Values of a column as floats. Unparseable or missing cells are `None`.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessDataError> {
    let series = cast_column(df, name, &DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>, ProcessDataError> {
    let series = cast_column(df, name, &DataType::Int32)?;
    Ok(series.i32()?.into_iter().collect())
}

pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessDataError> {
    let series = cast_column(df, name, &DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect())
}

/// Float values of an optional column; all `None` when the column doesn't exist yet.
fn optional_float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessDataError> {
    if df.get_column_index(name).is_none() {
        return Ok(vec![None; df.height()]);
    }
    float_values(df, name)
}

/// Dates of the `Date/Time` column, formatted `%Y-%m-%d`.
pub fn dates(df: &DataFrame) -> Result<Vec<NaiveDate>, ProcessDataError> {
    string_values(df, DATE)?
        .into_iter()
        .enumerate()
        .map(|(row, cell)| {
            let value = cell.unwrap_or_default();
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| ProcessDataError::InvalidDate { value, row })
        })
        .collect()
}

/// `(date, value)` pairs of a column, skipping rows where the value is missing.
pub fn dated_values(df: &DataFrame, name: &str) -> Result<Vec<(NaiveDate, f64)>, ProcessDataError> {
    let values = float_values(df, name)?;
    Ok(dates(df)?
        .into_iter()
        .zip(values)
        .filter_map(|(date, value)| value.filter(|v| !v.is_nan()).map(|v| (date, v)))
        .collect())
}

/// Converts every row of a processed frame into a [`WeatherRecord`].
///
/// Derived columns that haven't been computed yet come back as `None`.
pub fn extract_records(df: &DataFrame) -> Result<Vec<WeatherRecord>, ProcessDataError> {
    let dates = dates(df)?;
    let years = int_values(df, YEAR)?;
    let months = int_values(df, MONTH)?;
    let days = int_values(df, DAY)?;
    let temp_max = float_values(df, MAX_TEMP)?;
    let temp_min = float_values(df, MIN_TEMP)?;
    let temp_mean = float_values(df, MEAN_TEMP)?;
    let precipitation = float_values(df, TOTAL_PRECIP)?;
    let snow = float_values(df, SNOW_ON_GROUND)?;
    let prev = optional_float_values(df, MAX_TEMP_PREV)?;
    let zscore = optional_float_values(df, ZSCALED_MAX_TEMP)?;
    let minmax = optional_float_values(df, MINMAX_SCALED_MAX_TEMP)?;
    let bins: Vec<Option<TemperatureBin>> = if df.get_column_index(BIN).is_some() {
        string_values(df, BIN)?
            .into_iter()
            .map(|label| label.as_deref().and_then(TemperatureBin::from_label))
            .collect()
    } else {
        vec![None; df.height()]
    };

    Ok(dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| WeatherRecord {
            date,
            year: years[i].unwrap_or_else(|| date.year()),
            month: months[i].map(|m| m as u32).unwrap_or_else(|| date.month()),
            day: days[i].map(|d| d as u32).unwrap_or_else(|| date.day()),
            temp_max: temp_max[i],
            temp_min: temp_min[i],
            temp_mean: temp_mean[i],
            precipitation: precipitation[i],
            snow_on_ground: snow[i],
            temp_max_prev: prev[i],
            temp_max_zscore: zscore[i],
            temp_max_minmax: minmax[i],
            bin: bins[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            DATE => ["2020-03-01", "2020-03-02", "2020-03-03"],
            YEAR => [2020, 2020, 2020],
            MONTH => [3, 3, 3],
            DAY => [1, 2, 3],
            MAX_TEMP => [Some(4.0), None, Some(-1.5)],
            MIN_TEMP => [-2.0, -3.0, -8.0],
            MEAN_TEMP => [1.0, 0.0, -4.5],
            TOTAL_PRECIP => [0.0, 2.5, 0.0],
            SNOW_ON_GROUND => [0.0, 1.0, 2.0],
            BIN => [Some("Cold"), None, Some("Freezing")]
        )
        .unwrap()
    }

    #[test]
    fn test_dated_values_skips_missing() -> Result<(), ProcessDataError> {
        let points = dated_values(&frame(), MAX_TEMP)?;
        assert_eq!(
            points,
            vec![
                (NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), 4.0),
                (NaiveDate::from_ymd_opt(2020, 3, 3).unwrap(), -1.5),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_extract_records() -> Result<(), ProcessDataError> {
        let records = extract_records(&frame())?;
        assert_eq!(records.len(), 3);
        let first = &records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        assert_eq!((first.year, first.month, first.day), (2020, 3, 1));
        assert_eq!(first.temp_max, Some(4.0));
        assert_eq!(first.bin, Some(TemperatureBin::Cold));
        // Not derived yet.
        assert_eq!(first.temp_max_prev, None);
        assert_eq!(first.temp_max_zscore, None);
        assert_eq!(records[1].temp_max, None);
        assert_eq!(records[2].bin, Some(TemperatureBin::Freezing));
        Ok(())
    }

    #[test]
    fn test_invalid_date_is_reported_with_row() {
        let df = df!(DATE => ["2020-01-01", "yesterday"]).unwrap();
        let err = dates(&df).unwrap_err();
        assert!(matches!(err, ProcessDataError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = float_values(&frame(), "Wind Spd (km/h)").unwrap_err();
        assert!(matches!(err, ProcessDataError::ColumnNotFound(..)));
    }
}
