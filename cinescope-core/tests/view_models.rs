//! Integration tests for the row-decoding and view-model pipeline.
//!
//! These tests feed BSON documents shaped exactly like the aggregation
//! output (trailing `$project` columns) through the typed rows and into
//! the page view builders, covering the full path a live query takes
//! minus the store itself.

use mongodb::bson::{doc, from_document, Bson, Document};

use cinescope_core::types::*;
use cinescope_core::view;

fn decode<T: serde::de::DeserializeOwned>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .map(|d| from_document(d).expect("row should decode"))
        .collect()
}

// ============================================
// Row decoding
// ============================================

#[test]
fn test_genre_rows_decode() {
    let rows: Vec<GenreCount> = decode(vec![
        doc! { "genre": "Drama", "count": 12385 },
        doc! { "genre": "Comedy", "count": 6532 },
    ]);
    assert_eq!(rows[0].genre, "Drama");
    assert_eq!(rows[0].count, 12385);
}

#[test]
fn test_top_rated_rows_decode_mixed_numeric_types() {
    // The store mixes int32/int64/double for numeric columns
    let rows: Vec<TopRatedMovie> = decode(vec![doc! {
        "title": "Band of Brothers",
        "year": 2001_i32,
        "genres": ["Action", "Drama", "History"],
        "rating": 9.6,
        "votes": 143208_i64,
    }]);
    assert_eq!(rows[0].votes, 143208);
    assert_eq!(rows[0].genres.len(), 3);
}

#[test]
fn test_top_rated_row_without_genres_decodes() {
    let rows: Vec<TopRatedMovie> = decode(vec![doc! {
        "title": "Sparse",
        "year": 1970_i32,
        "rating": 8.1,
        "votes": 2000_i64,
    }]);
    assert!(rows[0].genres.is_empty());
}

#[test]
fn test_theater_rows_tolerate_dirty_coordinates() {
    let rows: Vec<TheaterLocation> = decode(vec![
        doc! {
            "city": "Bloomington",
            "state": "MN",
            "coordinates": [-93.24565, 44.85466],
        },
        // Missing coordinates entirely
        doc! { "city": "Nowhere" },
        // Non-numeric longitude
        doc! { "city": "Bad", "coordinates": ["east", 44.0] },
    ]);
    assert_eq!(rows.len(), 3);
    assert!(rows[1].coordinates.is_none());
    assert_eq!(rows[2].coordinates.as_ref().unwrap()[0], Bson::String("east".into()));
}

#[test]
fn test_comment_trend_rows_decode() {
    let rows: Vec<CommentTrendPoint> = decode(vec![
        doc! { "year": 2014_i32, "month": 12_i32, "count": 40 },
    ]);
    assert_eq!((rows[0].year, rows[0].month, rows[0].count), (2014, 12, 40));
}

#[test]
fn test_search_hits_decode_sparse_documents() {
    let rows: Vec<MovieHit> = decode(vec![
        doc! {
            "title": "The Godfather",
            "year": 1972_i32,
            "genres": ["Crime", "Drama"],
            "rating": 9.2,
            "plot": "The aging patriarch...",
        },
        doc! { "title": "Bare Minimum" },
    ]);
    assert_eq!(rows[0].rating, Some(9.2));
    assert!(rows[1].rating.is_none());
    assert!(rows[1].plot.is_none());
}

// ============================================
// Rows through view builders
// ============================================

#[test]
fn test_overview_end_to_end() {
    let genres: Vec<GenreCount> = decode(vec![
        doc! { "genre": "Drama", "count": 12385 },
        doc! { "genre": "Comedy", "count": 6532 },
    ]);
    let stats = OverviewStats {
        total_movies: 23530,
        total_users: 185,
        total_comments: 50304,
        total_theaters: 1564,
        avg_rating: 6.69,
    };

    let overview = view::overview::build(&stats, &genres, &[6.7, 7.1, 8.2]);

    assert_eq!(overview.tiles[0].value, "23,530");
    assert_eq!(overview.top_genres[0].label, "Drama");
    let binned: u64 = overview.rating_histogram.iter().map(|b| b.count).sum();
    assert_eq!(binned, 3);
}

#[test]
fn test_geographic_end_to_end_skips_bad_rows() {
    let theaters: Vec<TheaterLocation> = decode(vec![
        doc! { "city": "Bloomington", "state": "MN", "coordinates": [-93.24565, 44.85466] },
        doc! { "city": "Bad", "coordinates": ["east", 44.0] },
        doc! { "city": "Nowhere" },
    ]);
    let states: Vec<StateCount> = decode(vec![doc! { "state": "CA", "count": 169 }]);

    let geo = view::geographic::build(&theaters, &states, 200);

    assert_eq!(geo.points.len(), 1);
    assert_eq!(geo.skipped, 2);
    // [lon, lat] flipped to (lat, lon)
    assert_eq!(geo.points[0].lat, 44.85466);
    assert_eq!(geo.points[0].lon, -93.24565);
    assert_eq!(geo.states[0].value, 169);
}

#[test]
fn test_engagement_end_to_end() {
    let trend: Vec<CommentTrendPoint> = decode(vec![
        doc! { "year": 2014_i32, "month": 12_i32, "count": 40 },
        doc! { "year": 2015_i32, "month": 1_i32, "count": 55 },
    ]);
    let discussed: Vec<MostDiscussedMovie> = decode(vec![
        doc! { "title": "The Matrix", "year": 1999_i32, "comment_count": 161 },
    ]);
    let stats = OverviewStats {
        total_comments: 50304,
        total_users: 185,
        ..Default::default()
    };

    let engagement = view::engagement::build(&stats, &trend, &discussed);

    assert_eq!(engagement.trend[0].label, "Dec 2014");
    assert_eq!(engagement.most_discussed[0].title, "The Matrix");
    assert_eq!(engagement.tiles[2].label, "Comments per User");
}

#[test]
fn test_trends_end_to_end() {
    let decades: Vec<DecadeCount> = decode(vec![
        doc! { "decade": 1990_i32, "count": 2400 },
        doc! { "decade": 2000_i32, "count": 6800 },
    ]);
    let trend: Vec<RatingTrendPoint> = decode(vec![
        doc! { "decade": 1990_i32, "avg_rating": 6.61, "count": 2300 },
    ]);

    let trends = view::trends::build(&decades, &trend);

    assert_eq!(trends.production[1].label, "2000s");
    assert_eq!(trends.rating_trend[0].avg_rating, 6.61);
}
