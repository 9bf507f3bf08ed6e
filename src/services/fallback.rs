/// Fixed sample catalog served whenever the live TMDB path fails
///
/// Entries are filtered exactly like live data, so callers see the same
/// shape either way.
use std::sync::OnceLock;

use crate::models::{Category, Format, Genre, Movie};

struct SampleMovie {
    id: &'static str,
    title: &'static str,
    poster: &'static str,
    backdrop: &'static str,
    release_date: &'static str,
    runtime: u32,
    genres: &'static [&'static str],
    rating: f64,
    overview: &'static str,
    director: &'static str,
    cast: &'static [&'static str],
    trailer_url: &'static str,
    format: &'static [Format],
    category: Category,
}

impl From<&SampleMovie> for Movie {
    fn from(sample: &SampleMovie) -> Self {
        Movie {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            poster: sample.poster.to_string(),
            backdrop: Some(sample.backdrop.to_string()),
            release_date: sample.release_date.to_string(),
            runtime: sample.runtime,
            genres: sample.genres.iter().map(|g| g.to_string()).collect(),
            rating: sample.rating,
            overview: sample.overview.to_string(),
            director: Some(sample.director.to_string()),
            cast: Some(sample.cast.iter().map(|c| c.to_string()).collect()),
            trailer_url: Some(sample.trailer_url.to_string()),
            format: sample.format.to_vec(),
            category: sample.category,
        }
    }
}

const SAMPLE_MOVIES: [SampleMovie; 12] = [
    SampleMovie {
        id: "1",
        title: "Venom: The Last Dance",
        poster: "https://images.unsplash.com/photo-1626814026160-2237a95fc5a0?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1478720568477-152d9b164e26?w=1200&auto=format&fit=crop",
        release_date: "2025-05-15",
        runtime: 125,
        genres: &["Action", "Sci-Fi", "Thriller"],
        rating: 8.2,
        overview: "In this thrilling conclusion to the Venom trilogy, Eddie Brock and Venom face their most formidable challenge yet as they encounter a new symbiote threat that could destroy both of their worlds.",
        director: "Andy Serkis",
        cast: &["Tom Hardy", "Michelle Williams", "Woody Harrelson", "Naomie Harris"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::ThreeD, Format::Imax, Format::Imax3d],
        category: Category::Featured,
    },
    SampleMovie {
        id: "2",
        title: "Echoes of Eternity",
        poster: "https://images.unsplash.com/photo-1536440136628-849c177e76a1?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1489599849927-2ee91cede3ba?w=1200&auto=format&fit=crop",
        release_date: "2025-04-10",
        runtime: 142,
        genres: &["Drama", "Sci-Fi", "Mystery"],
        rating: 7.8,
        overview: "A brilliant physicist discovers a way to communicate across multiple dimensions, only to find that altering the fabric of reality comes with unforeseen consequences.",
        director: "Denis Villeneuve",
        cast: &["Rachel McAdams", "Oscar Isaac", "Tilda Swinton"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::Imax],
        category: Category::NowPlaying,
    },
    SampleMovie {
        id: "3",
        title: "Midnight Shadows",
        poster: "https://images.unsplash.com/photo-1500462918059-b1a0cb512f1d?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1506157786151-b8491531f063?w=1200&auto=format&fit=crop",
        release_date: "2025-04-22",
        runtime: 115,
        genres: &["Horror", "Thriller", "Mystery"],
        rating: 7.5,
        overview: "A group of friends on a weekend getaway encounter a supernatural entity that only appears after sunset, forcing them to confront their deepest fears.",
        director: "Ari Aster",
        cast: &["Florence Pugh", "Jack Reynor", "Lakeith Stanfield"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD],
        category: Category::NowPlaying,
    },
    SampleMovie {
        id: "4",
        title: "The Lost Expedition",
        poster: "https://images.unsplash.com/photo-1518909418078-96be7a1d6ead?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1465101162946-4377e57745c3?w=1200&auto=format&fit=crop",
        release_date: "2025-04-28",
        runtime: 135,
        genres: &["Adventure", "Action", "Drama"],
        rating: 8.1,
        overview: "When a renowned explorer disappears in the Amazon, his daughter assembles a team to find him, discovering a lost civilization and ancient dangers along the way.",
        director: "Kathryn Bigelow",
        cast: &["Charlize Theron", "Daniel Kaluuya", "Pedro Pascal"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::Imax],
        category: Category::NowPlaying,
    },
    SampleMovie {
        id: "5",
        title: "Quantum Break",
        poster: "https://images.unsplash.com/photo-1626814026160-2237a95fc5a0?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1531297484001-80022131f5a1?w=1200&auto=format&fit=crop",
        release_date: "2025-06-15",
        runtime: 130,
        genres: &["Sci-Fi", "Action", "Thriller"],
        rating: 7.9,
        overview: "A time-travel experiment gone wrong causes reality to fracture, giving a government agent the ability to manipulate time as a shadowy organization hunts him down.",
        director: "Christopher Nolan",
        cast: &["John David Washington", "Robert Pattinson", "Elizabeth Debicki"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::Imax, Format::Imax3d],
        category: Category::ComingSoon,
    },
    SampleMovie {
        id: "6",
        title: "The Golden Hour",
        poster: "https://images.unsplash.com/photo-1594909122845-11baa439b7bf?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1536440136628-849c177e76a1?w=1200&auto=format&fit=crop",
        release_date: "2025-06-30",
        runtime: 118,
        genres: &["Romance", "Drama"],
        rating: 7.3,
        overview: "Two strangers meet by chance during the golden hour of sunset in Paris, spending just one day together that will change both of their lives forever.",
        director: "Richard Linklater",
        cast: &["Zendaya", "Timothée Chalamet", "Jodie Comer"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD],
        category: Category::ComingSoon,
    },
    SampleMovie {
        id: "7",
        title: "Nebula's Edge",
        poster: "https://images.unsplash.com/photo-1518709766631-a6a7f45921c3?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1200&auto=format&fit=crop",
        release_date: "2025-07-12",
        runtime: 155,
        genres: &["Sci-Fi", "Adventure", "Drama"],
        rating: 8.5,
        overview: "A deep space mining crew discovers an abandoned alien ship at the edge of a nebula, finding technology that could save humanity but awakens an ancient threat.",
        director: "James Cameron",
        cast: &["Zoe Saldana", "Sam Worthington", "Sigourney Weaver"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::ThreeD, Format::Imax, Format::Imax3d],
        category: Category::ComingSoon,
    },
    SampleMovie {
        id: "8",
        title: "Whispers in the Dark",
        poster: "https://images.unsplash.com/photo-1626814026359-8cd5661a8450?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1478720568477-152d9b164e26?w=1200&auto=format&fit=crop",
        release_date: "2025-07-28",
        runtime: 110,
        genres: &["Horror", "Psychological", "Thriller"],
        rating: 7.7,
        overview: "A sleep researcher studying night terrors becomes the subject of her own experiment when she starts experiencing increasingly disturbing dreams that blur into reality.",
        director: "Mike Flanagan",
        cast: &["Anya Taylor-Joy", "Dev Patel", "Rebecca Hall"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD],
        category: Category::ComingSoon,
    },
    SampleMovie {
        id: "9",
        title: "The Matrix Resurrections",
        poster: "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=1200&auto=format&fit=crop",
        release_date: "2025-05-20",
        runtime: 148,
        genres: &["Action", "Sci-Fi", "Thriller"],
        rating: 8.6,
        overview: "Neo finds himself trapped once again in the simulated reality known as the Matrix, where he must confront a new enemy and rediscover who he truly is.",
        director: "Lana Wachowski",
        cast: &["Keanu Reeves", "Carrie-Anne Moss", "Yahya Abdul-Mateen II"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::ThreeD, Format::Imax],
        category: Category::NowPlaying,
    },
    SampleMovie {
        id: "10",
        title: "Midnight Forest",
        poster: "https://images.unsplash.com/photo-1500673922987-e212871fec22?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1500673922987-e212871fec22?w=1200&auto=format&fit=crop",
        release_date: "2025-06-10",
        runtime: 115,
        genres: &["Mystery", "Thriller", "Horror"],
        rating: 7.3,
        overview: "When strange lights begin appearing in the forest near a small town, a group of friends decides to investigate, only to discover a terrifying secret that's been hidden for decades.",
        director: "M. Night Shyamalan",
        cast: &["Joseph Quinn", "Sadie Sink", "Maya Hawke"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD],
        category: Category::ComingSoon,
    },
    SampleMovie {
        id: "11",
        title: "Cosmic Voyage",
        poster: "https://images.unsplash.com/photo-1470813740244-df37b8c1edcb?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1470813740244-df37b8c1edcb?w=1200&auto=format&fit=crop",
        release_date: "2025-05-05",
        runtime: 162,
        genres: &["Sci-Fi", "Adventure", "Drama"],
        rating: 9.0,
        overview: "A team of astronauts embarks on humanity's most ambitious space mission yet, traveling through a mysterious wormhole in search of a new habitable planet for humanity.",
        director: "Denis Villeneuve",
        cast: &["Timothée Chalamet", "Rebecca Ferguson", "Oscar Isaac"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::Imax, Format::Imax3d],
        category: Category::NowPlaying,
    },
    SampleMovie {
        id: "12",
        title: "Desert Mirage",
        poster: "https://images.unsplash.com/photo-1473580044384-7ba9967e16a0?w=500&auto=format&fit=crop",
        backdrop: "https://images.unsplash.com/photo-1473580044384-7ba9967e16a0?w=1200&auto=format&fit=crop",
        release_date: "2025-07-15",
        runtime: 128,
        genres: &["Action", "Adventure", "Thriller"],
        rating: 7.8,
        overview: "A treasure hunter searching for a legendary lost city in the Sahara Desert finds herself in a race against time and dangerous mercenaries who will stop at nothing to claim the treasure.",
        director: "Patty Jenkins",
        cast: &["Gal Gadot", "Idris Elba", "John David Washington"],
        trailer_url: "https://www.youtube.com/watch?v=dummylink",
        format: &[Format::TwoD, Format::Imax],
        category: Category::ComingSoon,
    },
];

static CATALOG: OnceLock<Vec<Movie>> = OnceLock::new();

/// All fallback movies in their fixed order
pub fn movies() -> &'static [Movie] {
    CATALOG.get_or_init(|| SAMPLE_MOVIES.iter().map(Movie::from).collect())
}

/// Fallback movies matching `category` (if given) and screening in `format`
/// (if given), in catalog order
pub fn get_fallback(category: Option<Category>, format: Option<Format>) -> Vec<Movie> {
    movies()
        .iter()
        .filter(|movie| category.map_or(true, |c| movie.category == c))
        .filter(|movie| format.map_or(true, |f| movie.has_format(f)))
        .cloned()
        .collect()
}

pub fn find(id: &str) -> Option<Movie> {
    movies().iter().find(|movie| movie.id == id).cloned()
}

/// First movie tagged featured, or the first movie overall
pub fn featured() -> Movie {
    let catalog = movies();
    catalog
        .iter()
        .find(|movie| movie.category == Category::Featured)
        .unwrap_or(&catalog[0])
        .clone()
}

/// Case-insensitive title substring match; blank queries match nothing
pub fn search(query: &str) -> Vec<Movie> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    movies()
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Movies sharing at least one genre with movie `id`, excluding it
pub fn related(id: &str) -> Vec<Movie> {
    let Some(source) = movies().iter().find(|movie| movie.id == id) else {
        return Vec::new();
    };

    movies()
        .iter()
        .filter(|movie| movie.id != source.id)
        .filter(|movie| source.genres.iter().any(|g| movie.has_genre(g)))
        .cloned()
        .collect()
}

/// Distinct genre names across the catalog with positional ids
pub fn genres() -> Vec<Genre> {
    let mut names: Vec<&str> = Vec::new();
    for movie in movies() {
        for genre in &movie.genres {
            if !names.contains(&genre.as_str()) {
                names.push(genre);
            }
        }
    }

    names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Genre {
            id: idx as u64,
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_catalog_shape() {
        let catalog = movies();
        assert_eq!(catalog.len(), 12);
        assert_eq!(
            ids(catalog),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
        );

        for movie in catalog {
            assert!(!movie.poster.is_empty());
            assert!(!movie.genres.is_empty());
            assert!(movie.runtime > 0);
            assert!(movie.has_format(Format::TwoD));
        }
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let now_playing = get_fallback(Some(Category::NowPlaying), None);
        assert_eq!(ids(&now_playing), vec!["2", "3", "4", "9", "11"]);

        let coming_soon = get_fallback(Some(Category::ComingSoon), None);
        assert_eq!(ids(&coming_soon), vec!["5", "6", "7", "8", "10", "12"]);

        let featured = get_fallback(Some(Category::Featured), None);
        assert_eq!(ids(&featured), vec!["1"]);
    }

    #[test]
    fn test_filter_by_format() {
        let imax_now = get_fallback(Some(Category::NowPlaying), Some(Format::Imax));
        assert_eq!(ids(&imax_now), vec!["2", "4", "9", "11"]);

        let three_d = get_fallback(None, Some(Format::ThreeD));
        assert_eq!(ids(&three_d), vec!["1", "7", "9"]);
    }

    #[test]
    fn test_no_filters_returns_everything() {
        assert_eq!(get_fallback(None, None).len(), 12);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("1").unwrap().title, "Venom: The Last Dance");
        assert!(find("nonexistent").is_none());
    }

    #[test]
    fn test_featured() {
        let movie = featured();
        assert_eq!(movie.id, "1");
        assert_eq!(movie.category, Category::Featured);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert_eq!(ids(&search("midnight")), vec!["3", "10"]);
        assert_eq!(ids(&search("MATRIX")), vec!["9"]);
        assert!(search("").is_empty());
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn test_related_shares_a_genre() {
        let matches = related("6");
        assert!(!matches.is_empty());
        assert!(!matches.iter().any(|m| m.id == "6"));
        for movie in &matches {
            assert!(movie.has_genre("Romance") || movie.has_genre("Drama"));
        }
        assert!(related("nonexistent").is_empty());
    }

    #[test]
    fn test_genres_are_distinct() {
        let genres = genres();
        assert_eq!(genres[0].name, "Action");
        assert_eq!(genres[0].id, 0);

        let mut names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
