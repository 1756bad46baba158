//! Line chart of one column against the date.

use crate::plotting::error::PlotError;
use crate::plotting::{ensure_plot_dir, render_error, IMAGE_SIZE};
use chrono::{Datelike, Duration, NaiveDate};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::{Path, PathBuf};

/// File name of the time series plot of `column` for `year`.
///
/// Path separators in the column name are replaced so the plot always lands
/// in the plot directory.
pub fn time_series_file_name(column: &str, year: i32) -> String {
    format!("plot_{}_{}.png", column.replace(['/', '\\'], "_"), year)
}

/// Date span of the points, widened to at least one day.
fn date_range(points: &[(NaiveDate, f64)]) -> (NaiveDate, NaiveDate) {
    let start = points.iter().map(|(d, _)| *d).min().unwrap_or_default();
    let end = points.iter().map(|(d, _)| *d).max().unwrap_or_default();
    if start == end {
        (start, end + Duration::days(1))
    } else {
        (start, end)
    }
}

/// Value span of the points with a 5% margin. A flat series gets a margin of one.
pub(crate) fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let margin = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - margin, max + margin)
}

/// Number of date labels: one on the 1st and one on the 15th of every month.
fn label_count(start: NaiveDate, end: NaiveDate) -> usize {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1;
    (months.max(1) as usize) * 2
}

/// Renders `points` as a blue line and writes `plot_{column}_{year}.png` into `out_dir`.
///
/// # Errors
///
/// Returns [`PlotError::NoData`] for an empty series, [`PlotError::DirCreation`]
/// if `out_dir` can't be created and [`PlotError::Render`] if drawing fails.
pub fn plot_time_series(
    points: &[(NaiveDate, f64)],
    column: &str,
    year: i32,
    out_dir: &Path,
) -> Result<PathBuf, PlotError> {
    if points.is_empty() {
        return Err(PlotError::NoData(column.to_string()));
    }
    ensure_plot_dir(out_dir)?;
    let path = out_dir.join(time_series_file_name(column, year));
    render(points, column, &path)?;
    Ok(path)
}

fn render(points: &[(NaiveDate, f64)], column: &str, path: &Path) -> Result<(), PlotError> {
    let (start, end) = date_range(points);
    let (y_min, y_max) = value_range(points.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(column, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(90)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(render_error(path))?;

    chart
        .configure_mesh()
        .x_labels(label_count(start, end))
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .x_label_style(
            ("sans-serif", 18)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Date")
        .y_desc(column)
        .axis_desc_style(("sans-serif", 24))
        .draw()
        .map_err(render_error(path))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(render_error(path))?
        .label(column)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(render_error(path))?;

    root.present().map_err(render_error(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            time_series_file_name("Max Temp (°C)", 2020),
            "plot_Max Temp (°C)_2020.png"
        );
        assert_eq!(time_series_file_name("Date/Time", 2019), "plot_Date_Time_2019.png");
    }

    #[test]
    fn test_date_range_widens_single_day() {
        assert_eq!(date_range(&[(day(3, 1), 1.0)]), (day(3, 1), day(3, 2)));
        assert_eq!(
            date_range(&[(day(3, 5), 1.0), (day(1, 2), 2.0)]),
            (day(1, 2), day(3, 5))
        );
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range([0.0, 10.0].into_iter()), (-0.5, 10.5));
        assert_eq!(value_range([4.0].into_iter()), (3.0, 5.0));
        assert_eq!(value_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn test_label_count_is_twice_per_month() {
        assert_eq!(label_count(day(1, 1), day(12, 31)), 24);
        assert_eq!(label_count(day(5, 3), day(5, 20)), 2);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = plot_time_series(&[], "Max Temp (°C)", 2020, dir.path());
        assert!(matches!(result, Err(PlotError::NoData(_))));
    }

    #[test]
    #[ignore = "renders a PNG file, needs system fonts"]
    fn test_plot_time_series_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let points: Vec<(NaiveDate, f64)> = (1..=28).map(|d| (day(2, d), d as f64 * 0.5)).collect();
        let path = plot_time_series(&points, "Max Temp (°C)", 2020, dir.path()).unwrap();
        assert!(path.exists());
    }
}
