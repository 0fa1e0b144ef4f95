//! Movie Analytics page: top-rated list and genre performance.

use serde::Serialize;

use crate::format::{format_count, format_rating_short, join_genres};
use crate::types::{GenrePerformance, TopRatedMovie};

/// One ranked row in the top-rated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRatedRow {
    pub rank: usize,
    pub title: String,
    pub year: String,
    pub genres: String,
    pub rating: String,
    pub votes: String,
}

/// One genre in the performance charts. Numeric so the renderer can
/// scale bars and place scatter points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePoint {
    pub genre: String,
    pub avg_rating: f64,
    pub count: i64,
}

/// View model for the Movie Analytics page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieAnalyticsView {
    pub top_rated: Vec<TopRatedRow>,
    pub genre_performance: Vec<GenrePoint>,
}

/// Build the Movie Analytics view model.
pub fn build(top_rated: &[TopRatedMovie], performance: &[GenrePerformance]) -> MovieAnalyticsView {
    let top_rated = top_rated
        .iter()
        .enumerate()
        .map(|(i, movie)| TopRatedRow {
            rank: i + 1,
            title: movie.title.clone(),
            year: movie
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            genres: join_genres(&movie.genres),
            rating: format_rating_short(movie.rating),
            votes: format_count(movie.votes.max(0) as u64),
        })
        .collect();

    let genre_performance = performance
        .iter()
        .map(|g| GenrePoint {
            genre: g.genre.clone(),
            avg_rating: g.avg_rating,
            count: g.count,
        })
        .collect();

    MovieAnalyticsView {
        top_rated,
        genre_performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: f64) -> TopRatedMovie {
        TopRatedMovie {
            title: title.to_string(),
            year: Some(1994),
            genres: vec!["Drama".to_string(), "Crime".to_string()],
            rating,
            votes: 1_689_764,
        }
    }

    #[test]
    fn test_ranks_start_at_one() {
        let view = build(&[movie("A", 9.3), movie("B", 9.2)], &[]);
        assert_eq!(view.top_rated[0].rank, 1);
        assert_eq!(view.top_rated[1].rank, 2);
    }

    #[test]
    fn test_row_formatting() {
        let view = build(&[movie("The Shawshank Redemption", 9.3)], &[]);
        let row = &view.top_rated[0];
        assert_eq!(row.year, "1994");
        assert_eq!(row.genres, "Drama, Crime");
        assert_eq!(row.rating, "9.3/10");
        assert_eq!(row.votes, "1,689,764");
    }

    #[test]
    fn test_missing_year_is_na() {
        let mut m = movie("Unknown", 8.0);
        m.year = None;
        let view = build(&[m], &[]);
        assert_eq!(view.top_rated[0].year, "N/A");
    }
}
