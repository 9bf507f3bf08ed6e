// ============================================================================
// TMDB API Types
// ============================================================================

use serde::Deserialize;

use super::Genre;

/// Raw movie record from TMDB
///
/// List endpoints return `genre_ids` only; the detail endpoint returns full
/// `genres` plus `runtime`, and `credits`/`videos` when appended. TMDB sends
/// `null` for many of these, so everything except `id` is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<Videos>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub crew: Option<Vec<CrewMember>>,
    #[serde(default)]
    pub cast: Option<Vec<CastMember>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CrewMember {
    #[serde(default)]
    pub job: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Videos {
    #[serde(default)]
    pub results: Option<Vec<Video>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub video_type: String,
}

/// Paginated envelope returned by every TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Record>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_record_deserialization() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": null,
            "backdrop_path": "/backdrop.jpg",
            "release_date": "1999-03-31",
            "genre_ids": [28, 878],
            "vote_average": 8.2,
            "overview": "A hacker learns the truth."
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 603);
        assert_eq!(record.poster_path, None);
        assert_eq!(record.genre_ids, Some(vec![28, 878]));
        assert!(record.genres.is_none());
        assert!(record.runtime.is_none());
        assert!(record.credits.is_none());
    }

    #[test]
    fn test_detail_record_deserialization() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "credits": {
                "cast": [{"name": "Brad Pitt", "character": "Tyler Durden"}],
                "crew": [{"job": "Director", "name": "David Fincher", "department": "Directing"}]
            },
            "videos": {
                "results": [{"key": "qtRKdVHc-cE", "site": "YouTube", "type": "Trailer"}]
            }
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.runtime, Some(139));
        assert_eq!(record.genres.as_ref().unwrap()[0].name, "Drama");

        let credits = record.credits.unwrap();
        assert_eq!(credits.crew.unwrap()[0].job, "Director");
        assert_eq!(credits.cast.unwrap()[0].name, "Brad Pitt");

        let video = &record.videos.unwrap().results.unwrap()[0];
        assert_eq!(video.video_type, "Trailer");
        assert_eq!(video.site, "YouTube");
    }

    #[test]
    fn test_list_response_tolerates_missing_results() {
        let response: ListResponse = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(response.page, 3);
        assert!(response.results.is_empty());
    }
}
