/// TMDB (The Movie Database) metadata client
///
/// Wraps the handful of TMDB v3 endpoints the storefront reads from. Every
/// request carries the configured API key and language; responses are
/// returned as raw [`Record`]s for the normalizer to digest.
///
/// Failures are never retried here. Callers above (the catalog facade)
/// decide what to serve instead.
use crate::{
    error::{AppError, AppResult},
    models::{
        tmdb::{GenreListResponse, ListResponse, Record},
        Genre,
    },
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::fmt::Display;

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1626814026160-2237a95fc5a0?w=500&auto=format&fit=crop";

/// Size token understood by the TMDB image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W185,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

/// Builds an absolute image URL from a TMDB path fragment
///
/// Missing or empty paths resolve to a fixed placeholder so the UI never
/// receives an empty image source.
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(path) if !path.trim().is_empty() => {
            format!("{}/{}{}", IMAGE_BASE_URL, size.as_str(), path)
        }
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

/// TMDB list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    NowPlaying,
    Upcoming,
    Popular,
    TopRated,
    Trending(TimeWindow),
}

impl Listing {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Listing::NowPlaying => "/movie/now_playing",
            Listing::Upcoming => "/movie/upcoming",
            Listing::Popular => "/movie/popular",
            Listing::TopRated => "/movie/top_rated",
            Listing::Trending(TimeWindow::Day) => "/trending/movie/day",
            Listing::Trending(TimeWindow::Week) => "/trending/movie/week",
        }
    }

    /// Parses the slug used in the public listings route
    pub fn from_slug(slug: &str) -> Option<Listing> {
        match slug {
            "now_playing" => Some(Listing::NowPlaying),
            "upcoming" => Some(Listing::Upcoming),
            "popular" => Some(Listing::Popular),
            "top_rated" => Some(Listing::TopRated),
            "trending" | "trending_week" => Some(Listing::Trending(TimeWindow::Week)),
            "trending_day" => Some(Listing::Trending(TimeWindow::Day)),
            _ => None,
        }
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint())
    }
}

/// Source of raw movie metadata
///
/// The catalog facade only talks to this trait, so tests can swap in a mock
/// and a future provider can replace TMDB without touching normalization.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataClient: Send + Sync {
    /// Full genre id/name table
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    /// One page of a list endpoint (list-form records, genre ids only)
    async fn list(&self, listing: Listing, page: u32) -> AppResult<Vec<Record>>;

    /// Detail-form record with credits and videos appended
    async fn details(&self, id: u64) -> AppResult<Record>;

    /// Free-text title search
    async fn search(&self, query: &str, page: u32) -> AppResult<Vec<Record>>;

    async fn similar(&self, id: u64, page: u32) -> AppResult<Vec<Record>>;

    async fn recommendations(&self, id: u64, page: u32) -> AppResult<Vec<Record>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Issues a GET against `endpoint` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint = %endpoint, status = %status, "TMDB request rejected");
            return Err(AppError::Transport {
                status: Some(status.as_u16()),
                message: format!("TMDB API returned status {}: {}", status, body),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint = %endpoint,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn get_list(
        &self,
        endpoint: &str,
        page: u32,
        extra: &[(&str, &str)],
    ) -> AppResult<Vec<Record>> {
        let page = page.to_string();
        let mut params = vec![("page", page.as_str())];
        params.extend_from_slice(extra);

        let response: ListResponse = self.get_json(endpoint, &params).await?;

        tracing::info!(
            endpoint = %endpoint,
            page = response.page,
            total_pages = response.total_pages,
            results = response.results.len(),
            provider = "tmdb",
            "List fetched"
        );

        Ok(response.results)
    }
}

#[async_trait::async_trait]
impl MetadataClient for TmdbClient {
    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let response: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;

        tracing::info!(
            genres = response.genres.len(),
            provider = "tmdb",
            "Genre list fetched"
        );

        Ok(response.genres)
    }

    async fn list(&self, listing: Listing, page: u32) -> AppResult<Vec<Record>> {
        self.get_list(listing.endpoint(), page, &[]).await
    }

    async fn details(&self, id: u64) -> AppResult<Record> {
        let endpoint = format!("/movie/{}", id);
        let record: Record = self
            .get_json(&endpoint, &[("append_to_response", "credits,videos")])
            .await?;

        tracing::info!(movie_id = id, provider = "tmdb", "Movie details fetched");

        Ok(record)
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<Vec<Record>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.get_list("/search/movie", page, &[("query", query)]).await
    }

    async fn similar(&self, id: u64, page: u32) -> AppResult<Vec<Record>> {
        self.get_list(&format!("/movie/{}/similar", id), page, &[])
            .await
    }

    async fn recommendations(&self, id: u64, page: u32) -> AppResult<Vec<Record>> {
        self.get_list(&format!("/movie/{}/recommendations", id), page, &[])
            .await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
