use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Dashboard settings.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Endpoint returning the dataset as a JSON array of records
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// How many recipes a sample request returns
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            sample_size: default_sample_size(),
        }
    }
}

// Default value functions
fn default_endpoint() -> String {
    "https://get-data-exaxb3e2dcddc6h8.canadacentral-01.azurewebsites.net/api/fetchdataset"
        .to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_sample_size() -> usize {
    crate::sample::DEFAULT_SAMPLE_SIZE
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with NUTRITION__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: NUTRITION__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        load_settings()
    }
}

/// See [`Settings::load`].
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("NUTRITION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
