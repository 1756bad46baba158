pub mod binning;
pub mod cleaning;
pub mod csv_loader;
pub mod error;
pub mod extractor;
pub mod features;
pub mod filtering;
pub mod process_data;
