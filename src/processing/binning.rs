//! Cuts the daily maximum temperature into [`TemperatureBin`]s and counts them.

use crate::processing::error::ProcessDataError;
use crate::processing::extractor::float_values;
use crate::processing::features::ColumnStats;
use crate::types::columns::{BIN, MAX_TEMP};
use crate::types::temperature_bin::{assign_bin, equal_width_edges, TemperatureBin};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

const COUNT: &str = "count";

/// Number of days that fell into one bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinCount {
    pub bin: TemperatureBin,
    pub count: usize,
}

/// Assigns every value of column `name` to one of six equal-width bins
/// spanning the column's observed range.
pub fn bin_values(
    df: &DataFrame,
    name: &str,
) -> Result<Vec<Option<TemperatureBin>>, ProcessDataError> {
    let stats = ColumnStats::from_column(df, name)?.ok_or(ProcessDataError::NothingToBin)?;
    let edges = equal_width_edges(stats.min, stats.max);
    Ok(float_values(df, name)?
        .into_iter()
        .map(|value| value.and_then(|v| assign_bin(v, &edges)))
        .collect())
}

/// Counts the labels of the `bin` column, most frequent first. Ties keep the
/// bin order and rows without a label are not counted.
pub fn count_bins(df: &DataFrame) -> Result<Vec<BinCount>, ProcessDataError> {
    let column = df
        .column(BIN)
        .map_err(|e| ProcessDataError::ColumnNotFound(BIN.to_string(), e))?;
    let op_err = |e| ProcessDataError::ColumnOperation {
        column: BIN.to_string(),
        source: e,
    };

    let counts = column
        .as_materialized_series()
        .value_counts(true, false, COUNT.into(), false)
        .map_err(op_err)?;
    let labels = counts.column(BIN)?.str()?;
    let totals = counts.column(COUNT)?.cast(&DataType::UInt64)?;

    let mut result: Vec<BinCount> = labels
        .into_iter()
        .zip(totals.u64()?.into_iter())
        .filter_map(|(label, count)| {
            Some(BinCount {
                bin: TemperatureBin::from_label(label?)?,
                count: count? as usize,
            })
        })
        .collect();
    result.sort_by_key(|c| (Reverse(c.count), c.bin));
    Ok(result)
}

/// Adds the `bin` label column to `df` and returns the label counts.
pub fn add_bin_column(df: &mut DataFrame) -> Result<Vec<BinCount>, ProcessDataError> {
    let bins = bin_values(df, MAX_TEMP)?;

    let labels: Vec<Option<&str>> = bins.iter().map(|bin| bin.map(|b| b.label())).collect();
    df.with_column(Series::new(BIN.into(), labels))?;

    count_bins(df)
}
