use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::{
    error::{AppError, AppResult},
    models::{tmdb::Record, Category, Format, Genre, Movie},
    services::{
        fallback,
        genres::GenreResolver,
        normalizer::{normalize, Synthesizer},
        tmdb::{Listing, MetadataClient},
    },
};

/// Where a catalog answer came from
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Fallback,
}

/// Catalog answer tagged with its source
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Served<T> {
    pub source: Source,
    pub data: T,
}

impl<T> Served<T> {
    pub fn live(data: T) -> Self {
        Self {
            source: Source::Live,
            data,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            source: Source::Fallback,
            data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Single entry point for movie queries
///
/// Every operation tries TMDB first. Any failure on the live path is logged
/// and answered from the fallback catalog instead, so callers never see an
/// error; they can tell degraded answers apart through [`Served::source`].
pub struct CatalogService {
    client: Arc<dyn MetadataClient>,
    genres: GenreResolver,
    synth: Mutex<Synthesizer>,
}

impl CatalogService {
    pub fn new(client: Arc<dyn MetadataClient>, synth: Synthesizer) -> Self {
        Self {
            genres: GenreResolver::new(Arc::clone(&client)),
            client,
            synth: Mutex::new(synth),
        }
    }

    /// Loads the genre cache ahead of the first list query
    pub async fn preload_genres(&self) {
        self.genres.warm().await;
    }

    /// Movies for a storefront section, optionally restricted to one format
    ///
    /// No category means featured (TMDB popular) on the live path, but no
    /// category filter on the fallback path.
    pub async fn get_movies(
        &self,
        category: Option<Category>,
        format: Option<Format>,
        page: u32,
    ) -> Served<Vec<Movie>> {
        match self.fetch_movies(category, format, page).await {
            Ok(movies) => Served::live(movies),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    category = ?category,
                    format = ?format,
                    provider = self.client.name(),
                    "Failed to fetch movies, serving fallback catalog"
                );
                Served::fallback(fallback::get_fallback(category, format))
            }
        }
    }

    pub async fn get_movie_by_id(&self, id: &str) -> Served<Option<Movie>> {
        match self.fetch_movie(id).await {
            Ok(movie) => Served::live(Some(movie)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id = %id,
                    provider = self.client.name(),
                    "Failed to fetch movie details, serving fallback catalog"
                );
                let movie = fallback::find(id);
                if movie.is_none() {
                    tracing::debug!(movie_id = %id, "Movie not in fallback catalog");
                }
                Served::fallback(movie)
            }
        }
    }

    /// Detail of the top popular movie
    pub async fn get_featured_movie(&self) -> Served<Movie> {
        match self.fetch_featured().await {
            Ok(movie) => Served::live(movie),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.client.name(),
                    "Failed to fetch featured movie, serving fallback catalog"
                );
                Served::fallback(fallback::featured())
            }
        }
    }

    /// Title search; blank queries return nothing without touching TMDB
    pub async fn get_movies_by_search(&self, query: &str, page: u32) -> Served<Vec<Movie>> {
        match self.fetch_search(query, page).await {
            Ok(movies) => Served::live(movies),
            Err(AppError::EmptyInput(reason)) => {
                tracing::debug!(reason = %reason, "Skipping search lookup");
                Served::live(Vec::new())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    query = %query,
                    provider = self.client.name(),
                    "Search failed, matching fallback catalog titles"
                );
                Served::fallback(fallback::search(query))
            }
        }
    }

    /// Any TMDB list endpoint, tagged with the matching storefront section
    pub async fn get_listing(&self, listing: Listing, page: u32) -> Served<Vec<Movie>> {
        let category = listing_category(listing);

        let result = async {
            let records = self.client.list(listing, page).await?;
            Ok::<_, AppError>(self.normalize_list(records, category).await)
        }
        .await;

        match result {
            Ok(movies) => Served::live(movies),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    listing = %listing,
                    provider = self.client.name(),
                    "Failed to fetch listing, serving fallback catalog"
                );
                let filter = match listing {
                    Listing::NowPlaying | Listing::Upcoming => Some(category),
                    _ => None,
                };
                Served::fallback(fallback::get_fallback(filter, None))
            }
        }
    }

    pub async fn get_similar(&self, id: &str, page: u32) -> Served<Vec<Movie>> {
        let result = async {
            let tmdb_id = parse_movie_id(id)?;
            let records = self.client.similar(tmdb_id, page).await?;
            Ok::<_, AppError>(self.normalize_list(records, Category::Featured).await)
        }
        .await;

        self.related_or_fallback(id, "similar", result)
    }

    pub async fn get_recommendations(&self, id: &str, page: u32) -> Served<Vec<Movie>> {
        let result = async {
            let tmdb_id = parse_movie_id(id)?;
            let records = self.client.recommendations(tmdb_id, page).await?;
            Ok::<_, AppError>(self.normalize_list(records, Category::Featured).await)
        }
        .await;

        self.related_or_fallback(id, "recommendations", result)
    }

    pub async fn get_genres(&self) -> Served<Vec<Genre>> {
        match self.genres.get_genres().await {
            Ok(genres) => Served::live(genres),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.client.name(),
                    "Failed to fetch genres, serving fallback genres"
                );
                Served::fallback(fallback::genres())
            }
        }
    }

    async fn fetch_movies(
        &self,
        category: Option<Category>,
        format: Option<Format>,
        page: u32,
    ) -> AppResult<Vec<Movie>> {
        let category = category.unwrap_or_default();
        let listing = match category {
            Category::Featured => Listing::Popular,
            Category::NowPlaying => Listing::NowPlaying,
            Category::ComingSoon => Listing::Upcoming,
        };

        let records = self.client.list(listing, page).await?;
        let mut movies = self.normalize_list(records, category).await;

        if let Some(format) = format {
            movies.retain(|movie| movie.has_format(format));
        }

        Ok(movies)
    }

    async fn fetch_movie(&self, id: &str) -> AppResult<Movie> {
        let tmdb_id = parse_movie_id(id)?;
        let record = self.client.details(tmdb_id).await?;
        Ok(self.normalize_detail(record).await)
    }

    async fn fetch_featured(&self) -> AppResult<Movie> {
        let popular = self.client.list(Listing::Popular, 1).await?;
        let top = popular
            .first()
            .ok_or_else(|| AppError::NotFound("No featured movie found".to_string()))?;

        let record = self.client.details(top.id).await?;
        Ok(self.normalize_detail(record).await)
    }

    async fn fetch_search(&self, query: &str, page: u32) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::EmptyInput("search query is blank".to_string()));
        }

        let records = self.client.search(query, page).await?;

        tracing::info!(
            query = %query,
            results = records.len(),
            provider = self.client.name(),
            "Title search completed"
        );

        Ok(self.normalize_list(records, Category::Featured).await)
    }

    fn related_or_fallback(
        &self,
        id: &str,
        kind: &'static str,
        result: AppResult<Vec<Movie>>,
    ) -> Served<Vec<Movie>> {
        match result {
            Ok(movies) => Served::live(movies),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id = %id,
                    kind = kind,
                    provider = self.client.name(),
                    "Failed to fetch related movies, serving fallback catalog"
                );
                Served::fallback(fallback::related(id))
            }
        }
    }

    /// List-form records only carry genre ids, so make sure the cache had a
    /// chance to load first
    async fn normalize_list(&self, records: Vec<Record>, category: Category) -> Vec<Movie> {
        self.genres.warm().await;
        let snapshot = self.genres.snapshot().await;

        let mut synth = self.synth.lock().unwrap_or_else(|e| e.into_inner());
        records
            .into_iter()
            .map(|record| normalize(record, category, &snapshot, &mut synth))
            .collect()
    }

    async fn normalize_detail(&self, record: Record) -> Movie {
        let snapshot = self.genres.snapshot().await;
        let mut synth = self.synth.lock().unwrap_or_else(|e| e.into_inner());
        normalize(record, Category::Featured, &snapshot, &mut synth)
    }
}

fn parse_movie_id(id: &str) -> AppResult<u64> {
    id.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid movie id: {}", id)))
}

fn listing_category(listing: Listing) -> Category {
    match listing {
        Listing::NowPlaying => Category::NowPlaying,
        Listing::Upcoming => Category::ComingSoon,
        _ => Category::Featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tmdb::{Credits, CrewMember, Video, Videos};
    use crate::services::{normalizer::FillPolicy, tmdb::MockMetadataClient};
    use mockall::predicate::eq;

    fn transport_error() -> AppError {
        AppError::Transport {
            status: Some(500),
            message: "Internal Server Error".to_string(),
        }
    }

    fn mock_client() -> MockMetadataClient {
        let mut client = MockMetadataClient::new();
        client.expect_name().return_const("mock");
        client
    }

    fn service(client: MockMetadataClient) -> CatalogService {
        CatalogService::new(
            Arc::new(client),
            Synthesizer::seeded(FillPolicy::Neutral, 0),
        )
    }

    fn record(id: u64, title: &str) -> Record {
        Record {
            id,
            title: Some(title.to_string()),
            poster_path: Some(format!("/{}.jpg", id)),
            release_date: Some("2025-01-01".to_string()),
            genre_ids: Some(vec![28]),
            vote_average: Some(7.0),
            ..Default::default()
        }
    }

    fn action_genre() -> Vec<Genre> {
        vec![Genre {
            id: 28,
            name: "Action".to_string(),
        }]
    }

    fn ids(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_get_movies_fallback_matches_category_and_format() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Err(transport_error()));
        let catalog = service(client);

        let served = catalog
            .get_movies(Some(Category::NowPlaying), Some(Format::Imax), 1)
            .await;

        assert!(served.is_fallback());
        assert_eq!(ids(&served.data), vec!["2", "4", "9", "11"]);
        assert_eq!(
            served.data,
            fallback::get_fallback(Some(Category::NowPlaying), Some(Format::Imax))
        );
    }

    #[tokio::test]
    async fn test_get_movies_fallback_without_category_is_unfiltered() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_movies(None, None, 1).await;
        assert!(served.is_fallback());
        assert_eq!(served.data.len(), 12);
    }

    #[tokio::test]
    async fn test_get_movies_live_tags_category_and_resolves_genres() {
        let mut client = mock_client();
        client
            .expect_list()
            .with(eq(Listing::Upcoming), eq(2))
            .times(1)
            .returning(|_, _| Ok(vec![record(10, "Sinners"), record(11, "Mickey 17")]));
        client
            .expect_genres()
            .times(1)
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        let served = catalog
            .get_movies(Some(Category::ComingSoon), None, 2)
            .await;

        assert_eq!(served.source, Source::Live);
        assert_eq!(ids(&served.data), vec!["10", "11"]);
        for movie in &served.data {
            assert_eq!(movie.category, Category::ComingSoon);
            assert_eq!(movie.genres, vec!["Action"]);
            assert_eq!(movie.runtime, 120);
        }
    }

    #[tokio::test]
    async fn test_get_movies_defaults_to_popular_featured() {
        let mut client = mock_client();
        client
            .expect_list()
            .with(eq(Listing::Popular), eq(1))
            .times(1)
            .returning(|_, _| Ok(vec![record(1, "Popular")]));
        client
            .expect_genres()
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        let served = catalog.get_movies(None, None, 1).await;
        assert_eq!(served.source, Source::Live);
        assert_eq!(served.data[0].category, Category::Featured);
    }

    #[tokio::test]
    async fn test_get_movies_live_format_filter() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Ok(vec![record(1, "Flat")]));
        client
            .expect_genres()
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        // Neutral policy only ever yields 2D
        let three_d = catalog
            .get_movies(Some(Category::NowPlaying), Some(Format::ThreeD), 1)
            .await;
        assert_eq!(three_d.source, Source::Live);
        assert!(three_d.data.is_empty());

        let two_d = catalog
            .get_movies(Some(Category::NowPlaying), Some(Format::TwoD), 1)
            .await;
        assert_eq!(two_d.data.len(), 1);
    }

    #[tokio::test]
    async fn test_get_movies_survives_genre_failure() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Ok(vec![record(1, "Orphan")]));
        client
            .expect_genres()
            .returning(|| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_movies(Some(Category::NowPlaying), None, 1).await;
        assert_eq!(served.source, Source::Live);
        assert_eq!(served.data[0].genres, vec!["Unknown"]);
    }

    #[tokio::test]
    async fn test_get_movie_by_id_fallback() {
        let mut client = mock_client();
        client
            .expect_details()
            .with(eq(1))
            .times(1)
            .returning(|_| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_movie_by_id("1").await;
        assert!(served.is_fallback());
        assert_eq!(served.data.unwrap().title, "Venom: The Last Dance");
    }

    #[tokio::test]
    async fn test_get_movie_by_id_not_found_anywhere() {
        // Non-numeric ids never reach TMDB
        let catalog = service(mock_client());

        let served = catalog.get_movie_by_id("nonexistent").await;
        assert!(served.is_fallback());
        assert!(served.data.is_none());
    }

    #[tokio::test]
    async fn test_get_movie_by_id_live_detail() {
        let mut client = mock_client();
        client.expect_details().with(eq(550)).returning(|id| {
            Ok(Record {
                credits: Some(Credits {
                    crew: Some(vec![CrewMember {
                        job: "Director".to_string(),
                        name: "X".to_string(),
                    }]),
                    cast: None,
                }),
                videos: Some(Videos {
                    results: Some(vec![Video {
                        key: "abc123".to_string(),
                        site: "YouTube".to_string(),
                        video_type: "Trailer".to_string(),
                    }]),
                }),
                ..record(id, "Fight Club")
            })
        });
        let catalog = service(client);

        let movie = catalog.get_movie_by_id("550").await;
        assert_eq!(movie.source, Source::Live);

        let movie = movie.into_inner().unwrap();
        assert_eq!(movie.id, "550");
        assert_eq!(movie.category, Category::Featured);
        assert_eq!(movie.director.as_deref(), Some("X"));
        assert_eq!(
            movie.trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[tokio::test]
    async fn test_get_featured_movie_live() {
        let mut client = mock_client();
        client
            .expect_list()
            .with(eq(Listing::Popular), eq(1))
            .returning(|_, _| Ok(vec![record(42, "Top"), record(43, "Second")]));
        client
            .expect_details()
            .with(eq(42))
            .times(1)
            .returning(|id| Ok(record(id, "Top")));
        let catalog = service(client);

        let served = catalog.get_featured_movie().await;
        assert_eq!(served.source, Source::Live);
        assert_eq!(served.data.id, "42");
    }

    #[tokio::test]
    async fn test_get_featured_movie_empty_popular_falls_back() {
        let mut client = mock_client();
        client.expect_list().returning(|_, _| Ok(vec![]));
        let catalog = service(client);

        let served = catalog.get_featured_movie().await;
        assert!(served.is_fallback());
        assert_eq!(served.data.id, "1");
        assert_eq!(served.data.category, Category::Featured);
    }

    #[tokio::test]
    async fn test_get_featured_movie_detail_failure_falls_back() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Ok(vec![record(42, "Top")]));
        client
            .expect_details()
            .returning(|_| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_featured_movie().await;
        assert!(served.is_fallback());
        assert_eq!(served.data, fallback::featured());
    }

    #[tokio::test]
    async fn test_blank_search_skips_client() {
        // No search expectation: any call would panic
        let catalog = service(mock_client());

        let served = catalog.get_movies_by_search("  ", 1).await;
        assert_eq!(served.source, Source::Live);
        assert!(served.data.is_empty());
    }

    #[tokio::test]
    async fn test_search_live_tags_featured() {
        let mut client = mock_client();
        client
            .expect_search()
            .withf(|query, page| query == "dune" && *page == 1)
            .returning(|_, _| Ok(vec![record(438631, "Dune")]));
        client
            .expect_genres()
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        let served = catalog.get_movies_by_search("dune", 1).await;
        assert_eq!(served.source, Source::Live);
        assert_eq!(served.data[0].title, "Dune");
        assert_eq!(served.data[0].category, Category::Featured);
    }

    #[tokio::test]
    async fn test_search_failure_matches_fallback_titles() {
        let mut client = mock_client();
        client
            .expect_search()
            .returning(|_, _| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_movies_by_search("Midnight", 1).await;
        assert!(served.is_fallback());
        assert_eq!(ids(&served.data), vec!["3", "10"]);
    }

    #[tokio::test]
    async fn test_get_listing_fallbacks() {
        let mut client = mock_client();
        client
            .expect_list()
            .returning(|_, _| Err(transport_error()));
        let catalog = service(client);

        let trending = catalog
            .get_listing(Listing::Trending(crate::services::tmdb::TimeWindow::Week), 1)
            .await;
        assert!(trending.is_fallback());
        assert_eq!(trending.data.len(), 12);

        let upcoming = catalog.get_listing(Listing::Upcoming, 1).await;
        assert!(upcoming
            .data
            .iter()
            .all(|m| m.category == Category::ComingSoon));
    }

    #[tokio::test]
    async fn test_get_listing_live_category() {
        let mut client = mock_client();
        client
            .expect_list()
            .with(eq(Listing::NowPlaying), eq(1))
            .returning(|_, _| Ok(vec![record(5, "Now")]));
        client
            .expect_genres()
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        let served = catalog.get_listing(Listing::NowPlaying, 1).await;
        assert_eq!(served.source, Source::Live);
        assert_eq!(served.data[0].category, Category::NowPlaying);
    }

    #[tokio::test]
    async fn test_similar_and_recommendations() {
        let mut client = mock_client();
        client
            .expect_similar()
            .with(eq(603), eq(1))
            .returning(|_, _| Ok(vec![record(604, "Reloaded")]));
        client
            .expect_recommendations()
            .returning(|_, _| Err(transport_error()));
        client
            .expect_genres()
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        let similar = catalog.get_similar("603", 1).await;
        assert_eq!(similar.source, Source::Live);
        assert_eq!(ids(&similar.data), vec!["604"]);

        let recommended = catalog.get_recommendations("6", 1).await;
        assert!(recommended.is_fallback());
        assert_eq!(recommended.data, fallback::related("6"));
    }

    #[tokio::test]
    async fn test_get_genres_live_then_cached() {
        let mut client = mock_client();
        client
            .expect_genres()
            .times(1)
            .returning(|| Ok(action_genre()));
        let catalog = service(client);

        assert_eq!(catalog.get_genres().await.data, action_genre());
        assert_eq!(catalog.get_genres().await.source, Source::Live);
    }

    #[tokio::test]
    async fn test_get_genres_fallback() {
        let mut client = mock_client();
        client
            .expect_genres()
            .returning(|| Err(transport_error()));
        let catalog = service(client);

        let served = catalog.get_genres().await;
        assert!(served.is_fallback());
        assert_eq!(served.data, fallback::genres());
    }

    #[test]
    fn test_served_serialization() {
        let served = Served::fallback(vec![1, 2]);
        let json = serde_json::to_value(&served).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
