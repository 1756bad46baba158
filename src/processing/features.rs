//! Columns derived from the daily maximum temperature.

use crate::processing::error::ProcessDataError;
use crate::processing::extractor::{cast_column, float_values};
use crate::types::columns::{MAX_TEMP, MAX_TEMP_PREV, MINMAX_SCALED_MAX_TEMP, ZSCALED_MAX_TEMP};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Shifts `values` down by one row. The first row keeps its own value.
pub fn lag_with_first_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some(first) = values.first() else {
        return Vec::new();
    };
    std::iter::once(*first)
        .chain(values.iter().take(values.len() - 1).copied())
        .collect()
}

/// Adds `Max Temp Prev (°C)`: the max temperature of the previous row.
pub fn add_previous_max_temp(df: &mut DataFrame) -> Result<(), ProcessDataError> {
    let max_temp = float_values(df, MAX_TEMP)?;
    let lagged = Series::new(MAX_TEMP_PREV.into(), lag_with_first_fill(&max_temp));
    df.with_column(lagged)?;
    Ok(())
}

/// Adds the z-score and min-max scaled max temperature columns.
///
/// The z-score uses the sample standard deviation. A constant column has no
/// spread, so both scaled columns come out as NaN or null.
pub fn add_scaled_max_temp(df: DataFrame) -> Result<DataFrame, ProcessDataError> {
    let max_temp = || col(MAX_TEMP).cast(DataType::Float64);

    let zscaled = ((max_temp() - max_temp().mean()) / max_temp().std(1)).alias(ZSCALED_MAX_TEMP);
    let minmax = ((max_temp() - max_temp().min()) / (max_temp().max() - max_temp().min()))
        .alias(MINMAX_SCALED_MAX_TEMP);

    Ok(df.lazy().with_columns([zscaled, minmax]).collect()?)
}

/// Summary statistics of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN with fewer than two values.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Statistics over the present, non-NaN values of column `name`.
    /// `None` when the column holds no such value.
    pub fn from_column(df: &DataFrame, name: &str) -> Result<Option<Self>, ProcessDataError> {
        let series = cast_column(df, name, &DataType::Float64)?;
        let values = series.f64()?;
        let values = values.filter(&values.is_not_nan())?;

        let count = values.len() - values.null_count();
        let (Some(mean), Some(min), Some(max)) = (values.mean(), values.min(), values.max())
        else {
            return Ok(None);
        };
        let std = if count > 1 {
            values.std(1).unwrap_or(f64::NAN)
        } else {
            f64::NAN
        };

        Ok(Some(Self {
            count,
            mean,
            std,
            min,
            max,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_with_first_fill() {
        assert_eq!(
            lag_with_first_fill(&[Some(1.0), Some(2.0), None, Some(4.0)]),
            vec![Some(1.0), Some(1.0), Some(2.0), None]
        );
        assert_eq!(lag_with_first_fill(&[Some(7.0)]), vec![Some(7.0)]);
        assert!(lag_with_first_fill(&[]).is_empty());
    }

    #[test]
    fn test_add_previous_max_temp() -> Result<(), Box<dyn std::error::Error>> {
        let mut df = df!(MAX_TEMP => [3.0, 5.0, -1.0])?;
        add_previous_max_temp(&mut df)?;
        let prev: Vec<Option<f64>> = df.column(MAX_TEMP_PREV)?.f64()?.into_iter().collect();
        assert_eq!(prev, vec![Some(3.0), Some(3.0), Some(5.0)]);
        Ok(())
    }

    #[test]
    fn test_add_scaled_max_temp() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(MAX_TEMP => [2.0, 4.0, 6.0])?;
        let df = add_scaled_max_temp(df)?;

        let z: Vec<f64> = df.column(ZSCALED_MAX_TEMP)?.f64()?.into_no_null_iter().collect();
        // mean 4, sample std 2
        assert!((z[0] - -1.0).abs() < 1e-12);
        assert!(z[1].abs() < 1e-12);
        assert!((z[2] - 1.0).abs() < 1e-12);

        let mm: Vec<f64> = df
            .column(MINMAX_SCALED_MAX_TEMP)?
            .f64()?
            .into_no_null_iter()
            .collect();
        assert_eq!(mm, vec![0.0, 0.5, 1.0]);
        Ok(())
    }

    #[test]
    fn test_column_stats() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(MAX_TEMP => [Some(2.0), None, Some(4.0), Some(f64::NAN), Some(6.0)])?;
        let stats = ColumnStats::from_column(&df, MAX_TEMP)?.unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.std, 2.0);
        assert_eq!((stats.min, stats.max), (2.0, 6.0));
        Ok(())
    }

    #[test]
    fn test_column_stats_without_values() -> Result<(), Box<dyn std::error::Error>> {
        let empty = df!(MAX_TEMP => [None::<f64>, None])?;
        assert!(ColumnStats::from_column(&empty, MAX_TEMP)?.is_none());

        let single = df!(MAX_TEMP => [1.0])?;
        assert!(ColumnStats::from_column(&single, MAX_TEMP)?.unwrap().std.is_nan());

        let missing = ColumnStats::from_column(&single, "Min Temp (°C)");
        assert!(matches!(missing, Err(ProcessDataError::ColumnNotFound(..))));
        Ok(())
    }
}
