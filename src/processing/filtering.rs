use crate::types::columns::YEAR;
use polars::prelude::{col, lit, DataType, LazyFrame};

pub trait WeatherFrameFilterExt {
    /// Keeps the rows whose `Year` column equals `year`.
    ///
    /// The column is cast to `Int32` first, so this works on raw text frames
    /// as well as on cleaned ones.
    fn filter_by_year(self, year: i32) -> LazyFrame;
}

impl WeatherFrameFilterExt for LazyFrame {
    fn filter_by_year(self, year: i32) -> LazyFrame {
        self.filter(col(YEAR).cast(DataType::Int32).eq(lit(year)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df!(
            YEAR => ["2018", "2019", "2019", "2020"],
            "Max Temp (°C)" => [1.0, 2.0, 3.0, 4.0]
        )
        .unwrap()
    }

    #[test]
    fn test_filter_by_year() -> Result<(), PolarsError> {
        let df = frame().lazy().filter_by_year(2019).collect()?;
        assert_eq!(df.height(), 2);
        let temps: Vec<f64> = df.column("Max Temp (°C)")?.f64()?.into_no_null_iter().collect();
        assert_eq!(temps, vec![2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_filter_by_year_absent() -> Result<(), PolarsError> {
        let df = frame().lazy().filter_by_year(1999).collect()?;
        assert_eq!(df.height(), 0);
        Ok(())
    }
}
