use crate::types::temperature_bin::TemperatureBin;
use chrono::NaiveDate;

/// One day of observations at a station, with the values derived during processing.
#[derive(Debug, PartialEq, Clone)]
pub struct WeatherRecord {
    pub date: NaiveDate,                   // Date/Time
    pub year: i32,                         // Year
    pub month: u32,                        // Month
    pub day: u32,                          // Day
    pub temp_max: Option<f64>,             // Max Temp (°C)
    pub temp_min: Option<f64>,             // Min Temp (°C)
    pub temp_mean: Option<f64>,            // Mean Temp (°C)
    pub precipitation: Option<f64>,        // Total Precip (mm)
    pub snow_on_ground: Option<f64>,       // Snow on Grnd (cm)
    pub temp_max_prev: Option<f64>,        // Max Temp Prev (°C)
    pub temp_max_zscore: Option<f64>,      // zscaled Max Temp (°C)
    pub temp_max_minmax: Option<f64>,      // minmax scaled Max Temp (°C)
    pub bin: Option<TemperatureBin>,       // bin
}
