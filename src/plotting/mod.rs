pub mod bar_chart;
pub mod error;
pub mod time_series;

use crate::plotting::error::PlotError;
use std::fmt::Display;
use std::path::Path;

/// Output image size in pixels.
pub(crate) const IMAGE_SIZE: (u32, u32) = (1800, 1200);

/// Creates the output directory of a plot if it doesn't exist yet.
pub(crate) fn ensure_plot_dir(dir: &Path) -> Result<(), PlotError> {
    std::fs::create_dir_all(dir).map_err(|e| PlotError::DirCreation(dir.to_path_buf(), e))
}

/// Maps a drawing error to a [`PlotError::Render`] for the image at `path`.
pub(crate) fn render_error<E: Display>(path: &Path) -> impl FnOnce(E) -> PlotError + '_ {
    move |e| PlotError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
