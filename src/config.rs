use serde::Deserialize;

use crate::services::{normalizer::FillPolicy, tmdb::DEFAULT_API_URL};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. Left empty, every live call fails and the fallback
    /// catalog is served.
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested from TMDB
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// How missing runtimes and formats are synthesized (`random` or `neutral`)
    #[serde(default)]
    pub fill_policy: FillPolicy,

    /// Fixed seed for synthesized fields
    #[serde(default)]
    pub fill_seed: Option<u64>,

    /// Load the genre table at startup instead of on the first list query
    #[serde(default = "default_preload_genres")]
    pub preload_genres: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_preload_genres() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
