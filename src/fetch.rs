use std::time::{Duration, Instant, SystemTime};

use log::debug;
use reqwest::Client;

use crate::config::Settings;
use crate::error::InsightError;
use crate::model::Record;
use crate::state::FetchStats;

/// Fetches the dataset from the remote endpoint.
///
/// Single-shot by design: no retry, no polling, no pagination. A failed
/// fetch is reported to the caller, who logs it and leaves the dashboard
/// on its previous dataset.
pub struct DatasetFetcher {
    client: Client,
    endpoint: String,
}

impl DatasetFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; NutritionInsights/1.0)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.endpoint.clone(),
            Some(Duration::from_secs(settings.timeout)),
        )
    }

    /// GET the endpoint and decode the JSON array of records, timing the
    /// round trip.
    pub async fn fetch(&self) -> Result<(Vec<Record>, FetchStats), InsightError> {
        let started = Instant::now();
        let response = self.client.get(&self.endpoint).send().await?;
        let body = response.error_for_status()?.text().await?;
        let records: Vec<Record> = serde_json::from_str(&body)?;

        let stats = FetchStats {
            duration: started.elapsed(),
            fetched_at: SystemTime::now(),
        };
        debug!(
            "fetched {} records in {} ms",
            records.len(),
            stats.duration.as_millis()
        );
        Ok((records, stats))
    }
}
