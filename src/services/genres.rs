use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::AppResult, models::Genre, services::tmdb::MetadataClient};

/// Genre id → name table, kept in TMDB order
#[derive(Debug, Default)]
pub struct GenreTable {
    ordered: Vec<Genre>,
    by_id: HashMap<u64, String>,
}

impl GenreTable {
    pub fn new(genres: Vec<Genre>) -> Self {
        let by_id = genres.iter().map(|g| (g.id, g.name.clone())).collect();
        Self {
            ordered: genres,
            by_id,
        }
    }

    pub fn genres(&self) -> &[Genre] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Process-wide genre cache
///
/// Starts `Empty` and becomes `Populated` on the first successful fetch. Never
/// invalidated. The whole table is swapped in at once so readers never see a
/// partial table.
#[derive(Debug, Clone, Default)]
pub enum GenreCache {
    #[default]
    Empty,
    Populated(Arc<GenreTable>),
}

/// Read-only view of the genre cache handed to the normalizer
#[derive(Debug, Clone, Default)]
pub struct GenreSnapshot(Option<Arc<GenreTable>>);

impl GenreSnapshot {
    /// Snapshot that resolves no ids
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn from_genres(genres: Vec<Genre>) -> Self {
        Self(Some(Arc::new(GenreTable::new(genres))))
    }

    pub fn is_populated(&self) -> bool {
        self.0.is_some()
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.0
            .as_ref()
            .and_then(|table| table.by_id.get(&id))
            .map(String::as_str)
    }
}

impl From<&GenreCache> for GenreSnapshot {
    fn from(cache: &GenreCache) -> Self {
        match cache {
            GenreCache::Empty => GenreSnapshot::empty(),
            GenreCache::Populated(table) => GenreSnapshot(Some(Arc::clone(table))),
        }
    }
}

/// Fetches and caches the TMDB genre table
#[derive(Clone)]
pub struct GenreResolver {
    client: Arc<dyn MetadataClient>,
    cache: Arc<RwLock<GenreCache>>,
}

impl GenreResolver {
    pub fn new(client: Arc<dyn MetadataClient>) -> Self {
        Self {
            client,
            cache: Arc::new(RwLock::new(GenreCache::Empty)),
        }
    }

    /// Returns the genre list, fetching it on first use
    ///
    /// A failed fetch leaves the cache empty and propagates the error; the
    /// next call tries again. Concurrent first calls may each hit the network.
    pub async fn get_genres(&self) -> AppResult<Vec<Genre>> {
        if let GenreCache::Populated(table) = &*self.cache.read().await {
            return Ok(table.genres().to_vec());
        }

        let genres = self.client.genres().await?;
        let table = Arc::new(GenreTable::new(genres));
        if table.is_empty() {
            tracing::warn!(
                provider = self.client.name(),
                "Genre list is empty, ids will resolve as Unknown"
            );
        }

        *self.cache.write().await = GenreCache::Populated(Arc::clone(&table));

        tracing::info!(
            genres = table.len(),
            provider = self.client.name(),
            "Genre cache populated"
        );

        Ok(table.genres().to_vec())
    }

    /// Loads the cache if empty, logging instead of failing
    pub async fn warm(&self) {
        if self.is_populated().await {
            return;
        }

        if let Err(e) = self.get_genres().await {
            tracing::warn!(
                error = %e,
                provider = self.client.name(),
                "Failed to load genres, ids will resolve as Unknown"
            );
        }
    }

    pub async fn is_populated(&self) -> bool {
        matches!(&*self.cache.read().await, GenreCache::Populated(_))
    }

    pub async fn snapshot(&self) -> GenreSnapshot {
        GenreSnapshot::from(&*self.cache.read().await)
    }
}
