//! Row types for aggregation results
//!
//! Every query in the catalog shapes its output server-side (a trailing
//! `$project` names the columns), so each of these structs maps 1:1 onto
//! the documents a pipeline returns and deserializes via
//! `bson::from_document`.

use mongodb::bson::Bson;
use serde::Deserialize;

/// Headline counts for the Overview page.
///
/// Assembled from four `count_documents` calls plus the average-rating
/// pipeline; not itself a pipeline row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewStats {
    pub total_movies: u64,
    pub total_users: u64,
    pub total_comments: u64,
    pub total_theaters: u64,
    pub avg_rating: f64,
}

/// One genre with its movie count (post-unwind, so a movie tagged with
/// three genres contributes to three rows).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

/// A single sampled IMDb rating.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingSample {
    pub rating: f64,
}

/// Movie count for one decade (1990 means 1990-1999).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecadeCount {
    pub decade: i32,
    pub count: i64,
}

/// One entry in the top-rated list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopRatedMovie {
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub rating: f64,
    pub votes: i64,
}

/// Average rating and movie count for one genre.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenrePerformance {
    pub genre: String,
    pub avg_rating: f64,
    pub count: i64,
}

/// Average rating and movie count for one decade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingTrendPoint {
    pub decade: i32,
    pub avg_rating: f64,
    pub count: i64,
}

/// Raw theater location row.
///
/// Coordinates stay as raw BSON: the store holds `[longitude, latitude]`
/// arrays of uneven quality, and malformed pairs are skipped one by one
/// at view time rather than failing the whole query.
#[derive(Debug, Clone, Deserialize)]
pub struct TheaterLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Vec<Bson>>,
}

/// Theater count for one US state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: i64,
}

/// Comment count for one calendar month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentTrendPoint {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

/// A movie ranked by how many comments reference it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MostDiscussedMovie {
    pub title: String,
    pub year: Option<i32>,
    pub comment_count: i64,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieHit {
    #[serde(default)]
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub plot: Option<String>,
}

/// Filters applied conjunctively by the movie search.
///
/// `None` means "no constraint"; a supplied constraint always narrows,
/// never widens, the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilters {
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Exact genre membership
    pub genre: Option<String>,
    /// Inclusive release-year range
    pub year_range: Option<(i32, i32)>,
}

impl SearchFilters {
    /// True when no filter is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.genre.is_none() && self.year_range.is_none()
    }
}
