//! Defines the weather station whose daily climate files are downloaded and processed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bulk data endpoint of Environment and Climate Change Canada.
pub const DEFAULT_BULK_DATA_URL: &str = "https://climate.weather.gc.ca/climate_data/bulk_data_e.html";

/// A single climate station of the Canadian climate archive.
///
/// The station is identified twice: by its `climate_id`, which appears in the
/// name of the downloaded files, and by its numeric `station_id`, which the
/// bulk data endpoint expects in the query string.
///
/// # Examples
///
/// ```
/// use weather_predictor::Station;
///
/// let calgary = Station::calgary_international();
/// assert_eq!(calgary.file_name(2019), "en_climate_daily_AB_3031094_2019_P1D.csv");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Station {
    /// Human readable name (e.g. "CALGARY INT'L CS").
    pub name: String,
    /// Two letter province code (e.g. "AB").
    pub province: String,
    /// Climate identifier used in file names (e.g. "3031094").
    pub climate_id: String,
    /// Numeric station identifier used by the download endpoint.
    pub station_id: u32,
}

impl Station {
    pub fn new(
        name: impl Into<String>,
        province: impl Into<String>,
        climate_id: impl Into<String>,
        station_id: u32,
    ) -> Self {
        Self {
            name: name.into(),
            province: province.into(),
            climate_id: climate_id.into(),
            station_id,
        }
    }

    /// Calgary International CS, Alberta.
    pub fn calgary_international() -> Self {
        Self::new("CALGARY INT'L CS", "AB", "3031094", 27211)
    }

    /// Name of the local file holding one year of daily records.
    pub fn file_name(&self, year: i32) -> String {
        format!(
            "en_climate_daily_{}_{}_{}_P1D.csv",
            self.province, self.climate_id, year
        )
    }

    /// Download URL of one year of daily records, relative to `base_url`.
    pub fn daily_url(&self, base_url: &str, year: i32) -> String {
        format!(
            "{}?format=csv&stationID={}&Year={}&Month=1&Day=14&timeframe=2&submit=Download+Data",
            base_url, self.station_id, year
        )
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::calgary_international()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.climate_id)
    }
}
