use std::sync::Arc;

use crate::{
    config::Config,
    services::{CatalogService, MetadataClient, Synthesizer, TmdbClient},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Wires the TMDB client and synthesizer described by `config`
    pub fn from_config(config: &Config) -> Self {
        if config.tmdb_api_key.is_empty() {
            tracing::warn!(
                "TMDB_API_KEY is not set, every request will be served from the fallback catalog"
            );
        }

        let client: Arc<dyn MetadataClient> = Arc::new(TmdbClient::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        ));

        let synth = match config.fill_seed {
            Some(seed) => Synthesizer::seeded(config.fill_policy, seed),
            None => Synthesizer::from_entropy(config.fill_policy),
        };

        tracing::info!(
            api_url = %config.tmdb_api_url,
            fill_policy = ?synth.policy(),
            seeded = config.fill_seed.is_some(),
            "Catalog service configured"
        );

        Self::new(CatalogService::new(client, synth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_degrades_to_fallback_when_tmdb_unreachable() {
        let config = Config::from_vars(vec![
            ("TMDB_API_URL".to_string(), "http://127.0.0.1:9".to_string()),
            ("FILL_POLICY".to_string(), "neutral".to_string()),
            ("FILL_SEED".to_string(), "3".to_string()),
        ])
        .unwrap();

        let state = AppState::from_config(&config);
        let served = state.catalog.get_featured_movie().await;

        assert!(served.is_fallback());
        assert_eq!(served.data.id, "1");
    }
}
