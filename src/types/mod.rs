pub mod columns;
pub mod station;
pub mod temperature_bin;
pub mod weather_record;
