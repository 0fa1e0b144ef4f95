//! Search page: result rows for the movie search.

use serde::Serialize;

use crate::format::{format_rating_short, join_genres};
use crate::types::MovieHit;

/// One search result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRow {
    pub title: String,
    pub year: String,
    pub genres: String,
    /// Formatted rating, or None when the movie has no rating
    pub rating: Option<String>,
    pub plot: String,
}

/// View model for the Search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    /// Number of matches (post-cap)
    pub found: usize,
    pub rows: Vec<SearchRow>,
}

/// Build the Search view model. An empty result set is a valid
/// "no data" state, not an error.
pub fn build(hits: &[MovieHit]) -> SearchView {
    let rows: Vec<SearchRow> = hits
        .iter()
        .map(|hit| SearchRow {
            title: hit.title.clone(),
            year: hit
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            genres: join_genres(&hit.genres),
            rating: hit.rating.map(format_rating_short),
            plot: hit
                .plot
                .clone()
                .unwrap_or_else(|| "No plot available".to_string()),
        })
        .collect();

    SearchView {
        found: rows.len(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_relabeled() {
        let hits = vec![MovieHit {
            title: "Chinatown".to_string(),
            year: Some(1974),
            genres: vec!["Mystery".to_string(), "Thriller".to_string()],
            rating: Some(8.2),
            plot: None,
        }];
        let view = build(&hits);

        assert_eq!(view.found, 1);
        let row = &view.rows[0];
        assert_eq!(row.year, "1974");
        assert_eq!(row.genres, "Mystery, Thriller");
        assert_eq!(row.rating.as_deref(), Some("8.2/10"));
        assert_eq!(row.plot, "No plot available");
    }

    #[test]
    fn test_empty_results_are_valid() {
        let view = build(&[]);
        assert_eq!(view.found, 0);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_unrated_movie_has_no_rating() {
        let hits = vec![MovieHit {
            title: "Obscure".to_string(),
            year: None,
            genres: vec![],
            rating: None,
            plot: Some("A plot.".to_string()),
        }];
        let view = build(&hits);
        assert!(view.rows[0].rating.is_none());
    }
}
