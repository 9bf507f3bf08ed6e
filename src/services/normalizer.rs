use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

use crate::{
    models::{
        tmdb::{Credits, Record, Videos},
        Category, Format, Movie,
    },
    services::{
        genres::GenreSnapshot,
        tmdb::{image_url, ImageSize},
    },
};

/// Genres used when a record resolves to none
pub const FALLBACK_GENRES: [&str; 2] = ["Action", "Adventure"];
pub const UNKNOWN_GENRE: &str = "Unknown";
pub const MAX_CAST: usize = 5;
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const RUNTIME_RANGE: std::ops::Range<u32> = 80..180;
const NEUTRAL_RUNTIME: u32 = 120;
const P_3D: f64 = 0.5;
const P_IMAX: f64 = 0.3;
const P_IMAX_3D: f64 = 0.1;

/// How fields TMDB does not provide get filled in
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Runtime drawn from [80, 180) minutes, extra formats drawn independently
    #[default]
    Random,
    /// Fixed 120 minute runtime, 2D only
    Neutral,
}

/// Source of synthesized runtime and format values
pub struct Synthesizer {
    policy: FillPolicy,
    rng: StdRng,
}

impl Synthesizer {
    pub fn seeded(policy: FillPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy(policy: FillPolicy) -> Self {
        Self {
            policy,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn policy(&self) -> FillPolicy {
        self.policy
    }

    pub fn runtime(&mut self) -> u32 {
        match self.policy {
            FillPolicy::Random => self.rng.random_range(RUNTIME_RANGE),
            FillPolicy::Neutral => NEUTRAL_RUNTIME,
        }
    }

    /// 2D always; IMAX 3D only alongside 3D
    pub fn formats(&mut self) -> Vec<Format> {
        let mut formats = vec![Format::TwoD];
        if self.policy == FillPolicy::Neutral {
            return formats;
        }

        let three_d = self.rng.random_bool(P_3D);
        let imax = self.rng.random_bool(P_IMAX);
        let imax_3d = self.rng.random_bool(P_IMAX_3D);

        if three_d {
            formats.push(Format::ThreeD);
        }
        if imax {
            formats.push(Format::Imax);
        }
        if imax_3d && three_d {
            formats.push(Format::Imax3d);
        }
        formats
    }
}

/// Converts a raw TMDB record into a storefront [`Movie`]
///
/// Performs no I/O. Genre ids resolve through `genres`; anything TMDB left
/// out is filled from `synth`.
pub fn normalize(
    record: Record,
    category: Category,
    genres: &GenreSnapshot,
    synth: &mut Synthesizer,
) -> Movie {
    let genre_names = extract_genres(&record, genres);
    let director = record.credits.as_ref().and_then(extract_director);
    let cast = record.credits.as_ref().and_then(extract_cast);
    let trailer_url = record.videos.as_ref().and_then(extract_trailer);

    let runtime = match record.runtime {
        Some(minutes) if minutes > 0 => minutes,
        _ => synth.runtime(),
    };

    Movie {
        id: record.id.to_string(),
        title: record.title.unwrap_or_default(),
        poster: image_url(record.poster_path.as_deref(), ImageSize::W500),
        backdrop: Some(image_url(record.backdrop_path.as_deref(), ImageSize::W1280)),
        release_date: record.release_date.unwrap_or_default(),
        runtime,
        genres: genre_names,
        rating: record.vote_average.unwrap_or_default(),
        overview: record.overview.unwrap_or_default(),
        director,
        cast,
        trailer_url,
        format: synth.formats(),
        category,
    }
}

fn extract_genres(record: &Record, genres: &GenreSnapshot) -> Vec<String> {
    let names: Vec<String> = if let Some(full) = &record.genres {
        full.iter().map(|g| g.name.clone()).collect()
    } else if let Some(ids) = &record.genre_ids {
        ids.iter()
            .map(|id| genres.name(*id).unwrap_or(UNKNOWN_GENRE).to_string())
            .collect()
    } else {
        Vec::new()
    };

    if names.is_empty() {
        FALLBACK_GENRES.iter().map(|g| g.to_string()).collect()
    } else {
        names
    }
}

fn extract_director(credits: &Credits) -> Option<String> {
    credits
        .crew
        .as_ref()?
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone())
}

fn extract_cast(credits: &Credits) -> Option<Vec<String>> {
    credits.cast.as_ref().map(|cast| {
        cast.iter()
            .take(MAX_CAST)
            .map(|member| member.name.clone())
            .collect()
    })
}

fn extract_trailer(videos: &Videos) -> Option<String> {
    videos
        .results
        .as_ref()?
        .iter()
        .find(|video| {
            video.site == "YouTube" && matches!(video.video_type.as_str(), "Trailer" | "Teaser")
        })
        .map(|video| format!("{}{}", YOUTUBE_WATCH_URL, video.key))
}
