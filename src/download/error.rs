use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid year range: start year {start} is after end year {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Failed to create download directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {0} failed while streaming the response body")]
    DownloadIo(String, #[source] std::io::Error),

    #[error("Failed writing downloaded data to '{0}'")]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to move downloaded data into place at '{0}'")]
    FilePersist(PathBuf, #[source] std::io::Error),
}
