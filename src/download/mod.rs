pub mod downloader;
pub mod error;
