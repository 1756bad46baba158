//! Column names of the daily climate CSV files, exactly as they appear in the
//! file headers, plus the names of the columns derived during processing.

pub const DATE: &str = "Date/Time";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const DAY: &str = "Day";
pub const MAX_TEMP: &str = "Max Temp (°C)";
pub const MIN_TEMP: &str = "Min Temp (°C)";
pub const MEAN_TEMP: &str = "Mean Temp (°C)";
pub const TOTAL_PRECIP: &str = "Total Precip (mm)";
pub const SNOW_ON_GROUND: &str = "Snow on Grnd (cm)";

/// Max temperature of the previous row.
pub const MAX_TEMP_PREV: &str = "Max Temp Prev (°C)";
pub const ZSCALED_MAX_TEMP: &str = "zscaled Max Temp (°C)";
pub const MINMAX_SCALED_MAX_TEMP: &str = "minmax scaled Max Temp (°C)";
pub const BIN: &str = "bin";

/// The columns read from every yearly file, in output order.
pub const LOADED_COLUMNS: [&str; 9] = [
    DATE,
    YEAR,
    MONTH,
    DAY,
    MAX_TEMP,
    MIN_TEMP,
    MEAN_TEMP,
    TOTAL_PRECIP,
    SNOW_ON_GROUND,
];

/// Integer-valued calendar columns.
pub const CALENDAR_COLUMNS: [&str; 3] = [YEAR, MONTH, DAY];

/// Float-valued measurement columns.
pub const MEASUREMENT_COLUMNS: [&str; 5] =
    [MAX_TEMP, MIN_TEMP, MEAN_TEMP, TOTAL_PRECIP, SNOW_ON_GROUND];
