pub mod charts;
pub mod coerce;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod nutrients;
pub mod sample;
pub mod state;

pub use charts::{BarChart, ChartKind, HeatmapChart, PieChart, ScatterChart};
pub use coerce::coerce;
pub use config::Settings;
pub use error::InsightError;
pub use fetch::DatasetFetcher;
pub use filter::{filter_dataset, DietFilter};
pub use model::{FieldValue, Record};
pub use nutrients::{NutrientProfile, NutrientValue, RecipeCard, NUTRIENT_KEYS};
pub use sample::{sample_recipes, DEFAULT_SAMPLE_SIZE};
pub use state::{Dashboard, Event, FetchStats};

/// Fetch the dataset from `endpoint` with default client settings.
pub async fn fetch_dataset(endpoint: &str) -> Result<(Vec<Record>, FetchStats), InsightError> {
    DatasetFetcher::new(endpoint, None).fetch().await
}
