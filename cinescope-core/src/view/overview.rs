//! Overview page: headline tiles, top genres, rating histogram.

use serde::Serialize;

use crate::format::{format_count, format_rating};
use crate::types::{GenreCount, OverviewStats};
use crate::view::{Bar, MetricTile};

/// Number of bins in the rating histogram (0.0 to 10.0 in 0.5 steps).
pub const HISTOGRAM_BINS: usize = 20;

/// How many genre bars the overview shows.
const TOP_GENRE_BARS: usize = 10;

/// One histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Lower edge of the bin (e.g., "7.5")
    pub label: String,
    pub count: u64,
}

/// View model for the Overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub tiles: Vec<MetricTile>,
    pub top_genres: Vec<Bar>,
    pub rating_histogram: Vec<HistogramBin>,
}

/// Build the Overview view model.
pub fn build(stats: &OverviewStats, genres: &[GenreCount], ratings: &[f64]) -> OverviewView {
    let tiles = vec![
        MetricTile::new("Total Movies", format_count(stats.total_movies)),
        MetricTile::new("Registered Users", format_count(stats.total_users)),
        MetricTile::new("User Comments", format_count(stats.total_comments)),
        MetricTile::new("Theaters", format_count(stats.total_theaters)),
        MetricTile::new("Avg Rating", format_rating(stats.avg_rating)),
    ];

    let top_genres = genres
        .iter()
        .take(TOP_GENRE_BARS)
        .map(|g| Bar {
            label: g.genre.clone(),
            value: g.count.max(0) as u64,
        })
        .collect();

    OverviewView {
        tiles,
        top_genres,
        rating_histogram: bin_ratings(ratings),
    }
}

/// Bin rating samples into `HISTOGRAM_BINS` half-point buckets.
///
/// Samples outside [0, 10] are clamped into the edge bins; a rating of
/// exactly 10.0 lands in the top bin.
fn bin_ratings(ratings: &[f64]) -> Vec<HistogramBin> {
    let mut counts = [0u64; HISTOGRAM_BINS];
    for &rating in ratings {
        let idx = (rating / 0.5).floor() as isize;
        let idx = idx.clamp(0, HISTOGRAM_BINS as isize - 1) as usize;
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            label: format!("{:.1}", i as f64 * 0.5),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> OverviewStats {
        OverviewStats {
            total_movies: 23530,
            total_users: 185,
            total_comments: 50304,
            total_theaters: 1564,
            avg_rating: 6.6925,
        }
    }

    #[test]
    fn test_tiles_are_formatted() {
        let view = build(&stats(), &[], &[]);
        assert_eq!(view.tiles.len(), 5);
        assert_eq!(view.tiles[0].value, "23,530");
        assert_eq!(view.tiles[4].value, "6.69/10");
    }

    #[test]
    fn test_top_genres_capped_at_ten() {
        let genres: Vec<GenreCount> = (0..20)
            .map(|i| GenreCount {
                genre: format!("Genre {}", i),
                count: 100 - i,
            })
            .collect();
        let view = build(&stats(), &genres, &[]);
        assert_eq!(view.top_genres.len(), 10);
        assert_eq!(view.top_genres[0].label, "Genre 0");
    }

    #[test]
    fn test_histogram_totals_match_sample_count() {
        let ratings = vec![0.0, 0.4, 0.5, 7.2, 7.4, 9.9, 10.0];
        let view = build(&stats(), &[], &ratings);

        assert_eq!(view.rating_histogram.len(), HISTOGRAM_BINS);
        let total: u64 = view.rating_histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, ratings.len() as u64);

        // 0.0 and 0.4 share the first bin; 10.0 lands in the last
        assert_eq!(view.rating_histogram[0].count, 2);
        assert_eq!(view.rating_histogram[1].count, 1);
        assert_eq!(view.rating_histogram[19].count, 2);
    }

    #[test]
    fn test_histogram_clamps_out_of_range() {
        let view = build(&stats(), &[], &[-1.0, 12.0]);
        assert_eq!(view.rating_histogram[0].count, 1);
        assert_eq!(view.rating_histogram[19].count, 1);
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        let view = build(&OverviewStats::default(), &[], &[]);
        assert!(view.top_genres.is_empty());
        assert_eq!(view.tiles[0].value, "0");
    }
}
