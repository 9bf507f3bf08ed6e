use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::get_movies))
        .route("/movies/featured", get(handlers::get_featured_movie))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .route("/movies/:id/similar", get(handlers::get_similar))
        .route(
            "/movies/:id/recommendations",
            get(handlers::get_recommendations),
        )
        .route("/listings/:listing", get(handlers::get_listing))
        .route("/genres", get(handlers::get_genres))
}
