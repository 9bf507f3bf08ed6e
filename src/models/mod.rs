use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

pub mod tmdb;

/// Storefront section a movie is listed under
///
/// Supplied by the caller of a catalog query, never derived from TMDB data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NowPlaying,
    ComingSoon,
    #[default]
    Featured,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NowPlaying => "now_playing",
            Category::ComingSoon => "coming_soon",
            Category::Featured => "featured",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "now_playing" => Ok(Category::NowPlaying),
            "coming_soon" => Ok(Category::ComingSoon),
            "featured" => Ok(Category::Featured),
            _ => Err(AppError::InvalidInput(format!("Unknown category: {}", s))),
        }
    }
}

/// Exhibition format a movie is screened in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "IMAX")]
    Imax,
    #[serde(rename = "IMAX 3D")]
    Imax3d,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::TwoD => "2D",
            Format::ThreeD => "3D",
            Format::Imax => "IMAX",
            Format::Imax3d => "IMAX 3D",
        }
    }

    /// Parses a format filter as sent by the storefront
    ///
    /// `"All"` (any case) and blank strings mean no filter.
    pub fn parse_filter(raw: &str) -> Result<Option<Format>, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "2D" => Ok(Format::TwoD),
            "3D" => Ok(Format::ThreeD),
            "IMAX" => Ok(Format::Imax),
            "IMAX 3D" | "IMAX3D" | "IMAX_3D" => Ok(Format::Imax3d),
            _ => Err(AppError::InvalidInput(format!("Unknown format: {}", s))),
        }
    }
}

/// Genre id/name pair as published by TMDB
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Movie as consumed by the storefront UI
///
/// Always carries a poster URL, at least one genre, a positive runtime and
/// the 2D format, whether it came from TMDB or the fallback catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
    pub release_date: String,
    /// Minutes
    pub runtime: u32,
    pub genres: Vec<String>,
    pub rating: f64,
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    pub format: Vec<Format>,
    pub category: Category,
}

impl Movie {
    pub fn has_format(&self, format: Format) -> bool {
        self.format.contains(&format)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}
