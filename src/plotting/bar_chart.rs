//! Bar chart of the temperature bin counts.

use crate::plotting::error::PlotError;
use crate::plotting::{ensure_plot_dir, render_error, IMAGE_SIZE};
use crate::processing::binning::BinCount;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const BIN_PLOT_FILE_NAME: &str = "plot_categories.png";

/// Renders one bar per entry of `counts`, in the given order, into `out_dir/plot_categories.png`.
pub fn plot_bin_counts(counts: &[BinCount], out_dir: &Path) -> Result<PathBuf, PlotError> {
    if counts.is_empty() {
        return Err(PlotError::NoData("bin".to_string()));
    }
    ensure_plot_dir(out_dir)?;
    let path = out_dir.join(BIN_PLOT_FILE_NAME);
    render(counts, &path)?;
    Ok(path)
}

fn render(counts: &[BinCount], path: &Path) -> Result<(), PlotError> {
    let labels: Vec<&str> = counts.iter().map(|c| c.bin.label()).collect();
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0) as u32;

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("bin", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (0u32..counts.len() as u32).into_segmented(),
            0u32..max_count + max_count / 10 + 1,
        )
        .map_err(render_error(path))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 20))
        .y_desc("count")
        .axis_desc_style(("sans-serif", 24))
        .draw()
        .map_err(render_error(path))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(20)
                .data(
                    counts
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (i as u32, c.count as u32)),
                ),
        )
        .map_err(render_error(path))?;

    root.present().map_err(render_error(path))?;
    Ok(())
}
