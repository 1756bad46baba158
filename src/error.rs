use crate::download::error::DownloadError;
use crate::processing::error::ProcessDataError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherPredictorError {
    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    ProcessData(#[from] ProcessDataError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to create output directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode pipeline summary")]
    SummaryEncode(#[source] serde_json::Error),

    #[error("Failed to write pipeline summary to '{0}'")]
    SummaryWrite(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
