pub mod catalog;
pub mod fallback;
pub mod genres;
pub mod normalizer;
pub mod tmdb;

pub use catalog::{CatalogService, Served, Source};
pub use genres::{GenreResolver, GenreSnapshot};
pub use normalizer::{normalize, FillPolicy, Synthesizer};
pub use tmdb::{image_url, ImageSize, Listing, MetadataClient, TimeWindow, TmdbClient};
