use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Nothing to plot for '{0}'")]
    NoData(String),

    #[error("Failed to create plot directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to render plot '{path}': {message}")]
    Render { path: PathBuf, message: String },
}
