use thiserror::Error;

/// Errors that can occur at the edges of the dashboard core.
///
/// The data-shaping pipeline itself is total and never errors; only the
/// dataset fetch, configuration loading, and selector parsing can fail.
#[derive(Error, Debug)]
pub enum InsightError {
    /// Failed to fetch the dataset from the remote endpoint
    #[error("Failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The endpoint responded with something other than a JSON array of records
    #[error("Failed to decode dataset: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A diet selector value outside the fixed enumerated set
    #[error("Unknown diet type: {0}")]
    UnknownDiet(String),
}
