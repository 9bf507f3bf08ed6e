use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Category, Format, Genre, Movie},
    services::{Listing, Served},
};

use super::AppState;

// Request types

// Query values stay raw strings; parse failures become `AppError::InvalidInput`

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub category: Option<String>,
    pub format: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// TMDB pages are 1-based
fn parse_page(page: Option<&str>) -> AppResult<u32> {
    let Some(raw) = page.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(1);
    };

    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(AppError::InvalidInput(format!(
            "page must be a number 1 or greater, got {}",
            raw
        ))),
    }
}

/// Blank means no category
fn parse_category(category: Option<&str>) -> AppResult<Option<Category>> {
    match category.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Movies for a storefront section, optionally filtered by format
pub async fn get_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MoviesQuery>,
) -> AppResult<Json<Served<Vec<Movie>>>> {
    let category = parse_category(params.category.as_deref())?;
    let format = match params.format.as_deref() {
        Some(raw) => Format::parse_filter(raw)?,
        None => None,
    };
    let page = parse_page(params.page.as_deref())?;

    let served = state.catalog.get_movies(category, format, page).await;

    tracing::info!(
        request_id = %request_id,
        category = ?category,
        format = ?format,
        source = ?served.source,
        results = served.data.len(),
        "Movies served"
    );

    Ok(Json(served))
}

pub async fn get_featured_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Served<Movie>> {
    let served = state.catalog.get_featured_movie().await;

    tracing::info!(
        request_id = %request_id,
        movie_id = %served.data.id,
        source = ?served.source,
        "Featured movie served"
    );

    Json(served)
}

/// Title search; an empty `q` yields an empty result
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Served<Vec<Movie>>>> {
    let page = parse_page(params.page.as_deref())?;
    let served = state.catalog.get_movies_by_search(&params.q, page).await;

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        source = ?served.source,
        results = served.data.len(),
        "Search served"
    );

    Ok(Json(served))
}

/// Single movie; 404 when neither TMDB nor the fallback catalog knows it
pub async fn get_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> AppResult<Json<Served<Movie>>> {
    let served = state.catalog.get_movie_by_id(&id).await;
    let source = served.source;

    tracing::info!(
        request_id = %request_id,
        movie_id = %id,
        source = ?source,
        found = served.data.is_some(),
        "Movie lookup served"
    );

    match served.into_inner() {
        Some(movie) => Ok(Json(Served { source, data: movie })),
        None => Err(AppError::NotFound(format!("Movie {} not found", id))),
    }
}

pub async fn get_similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Served<Vec<Movie>>>> {
    let page = parse_page(params.page.as_deref())?;
    Ok(Json(state.catalog.get_similar(&id, page).await))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Served<Vec<Movie>>>> {
    let page = parse_page(params.page.as_deref())?;
    Ok(Json(state.catalog.get_recommendations(&id, page).await))
}

/// Any TMDB listing by slug (`popular`, `top_rated`, `trending_day`, ...)
pub async fn get_listing(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Served<Vec<Movie>>>> {
    let listing = Listing::from_slug(&slug)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown listing: {}", slug)))?;
    let page = parse_page(params.page.as_deref())?;

    Ok(Json(state.catalog.get_listing(listing, page).await))
}

pub async fn get_genres(State(state): State<AppState>) -> Json<Served<Vec<Genre>>> {
    Json(state.catalog.get_genres().await)
}
