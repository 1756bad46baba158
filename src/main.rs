use weather_predictor::{WeatherPipeline, WeatherPredictorError};

#[tokio::main]
async fn main() -> Result<(), WeatherPredictorError> {
    // RUST_LOG=debug (or trace) for more detail.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pipeline = WeatherPipeline::builder()
        .start_year(2010)
        .test_year(2019)
        .plot_year(2020)
        .build()?;

    let summary = pipeline.run().await?;

    println!(
        "Processed {} train days and {} test days for {}",
        summary.train_rows, summary.test_rows, summary.station
    );
    for count in &summary.bin_counts {
        println!("{:>20}: {}", count.bin, count.count);
    }
    for plot in &summary.plots {
        println!("Wrote {}", plot.display());
    }
    Ok(())
}
