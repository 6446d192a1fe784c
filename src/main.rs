use std::time::Duration;

use log::{error, info};

use nutrition_insights::{Dashboard, DatasetFetcher, Event, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = Settings::load()?;
    let mut dashboard = Dashboard::with_sample_size(settings.sample_size);

    let fetcher = DatasetFetcher::new(
        &settings.endpoint,
        Some(Duration::from_secs(settings.timeout)),
    );
    match fetcher.fetch().await {
        Ok((records, stats)) => {
            info!(
                "loaded {} records in {} ms",
                records.len(),
                stats.duration.as_millis()
            );
            dashboard.apply(Event::DatasetLoaded { records, stats });
        }
        Err(err) => {
            error!("Error fetching dataset: {}", err);
            dashboard.apply(Event::FetchFailed);
        }
    }

    // Hand each aggregate view to the chart sink (stdout here).
    println!("{}", serde_json::to_string_pretty(&dashboard.bar_chart())?);
    println!("{}", serde_json::to_string_pretty(&dashboard.scatter_chart())?);
    println!("{}", serde_json::to_string_pretty(&dashboard.heatmap_chart())?);
    println!("{}", serde_json::to_string_pretty(&dashboard.pie_chart())?);

    Ok(())
}
