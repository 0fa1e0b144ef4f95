//! User Engagement page: comment volume and most-discussed movies.

use serde::Serialize;

use crate::format::{format_count, month_label};
use crate::types::{CommentTrendPoint, MostDiscussedMovie, OverviewStats};
use crate::view::MetricTile;

/// One month on the comment activity line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    /// e.g., "Mar 2015"
    pub label: String,
    pub count: i64,
}

/// One ranked most-discussed movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussedRow {
    pub rank: usize,
    pub title: String,
    pub year: String,
    pub comments: String,
}

/// View model for the User Engagement page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementView {
    pub tiles: Vec<MetricTile>,
    pub trend: Vec<MonthPoint>,
    pub most_discussed: Vec<DiscussedRow>,
}

/// Build the User Engagement view model.
pub fn build(
    stats: &OverviewStats,
    trend: &[CommentTrendPoint],
    discussed: &[MostDiscussedMovie],
) -> EngagementView {
    // The only arithmetic in the view layer: a ratio of two counts the
    // store already returned
    let per_user = if stats.total_users > 0 {
        stats.total_comments as f64 / stats.total_users as f64
    } else {
        0.0
    };

    let tiles = vec![
        MetricTile::new("Total Comments", format_count(stats.total_comments)),
        MetricTile::new("Total Users", format_count(stats.total_users)),
        MetricTile::new("Comments per User", format!("{:.2}", per_user)),
    ];

    let trend = trend
        .iter()
        .map(|p| MonthPoint {
            label: month_label(p.year, p.month),
            count: p.count,
        })
        .collect();

    let most_discussed = discussed
        .iter()
        .enumerate()
        .map(|(i, movie)| DiscussedRow {
            rank: i + 1,
            title: movie.title.clone(),
            year: movie
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            comments: format_count(movie.comment_count.max(0) as u64),
        })
        .collect();

    EngagementView {
        tiles,
        trend,
        most_discussed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_per_user_ratio() {
        let stats = OverviewStats {
            total_comments: 50304,
            total_users: 185,
            ..Default::default()
        };
        let view = build(&stats, &[], &[]);
        assert_eq!(view.tiles[2].value, "271.91");
    }

    #[test]
    fn test_zero_users_gives_zero_ratio() {
        let stats = OverviewStats {
            total_comments: 100,
            total_users: 0,
            ..Default::default()
        };
        let view = build(&stats, &[], &[]);
        assert_eq!(view.tiles[2].value, "0.00");
    }

    #[test]
    fn test_trend_labels_are_chronological_months() {
        let trend = vec![
            CommentTrendPoint { year: 2014, month: 12, count: 40 },
            CommentTrendPoint { year: 2015, month: 1, count: 55 },
        ];
        let view = build(&OverviewStats::default(), &trend, &[]);
        assert_eq!(view.trend[0].label, "Dec 2014");
        assert_eq!(view.trend[1].label, "Jan 2015");
    }

    #[test]
    fn test_discussed_rows_are_ranked() {
        let discussed = vec![
            MostDiscussedMovie {
                title: "The Matrix".to_string(),
                year: Some(1999),
                comment_count: 161,
            },
            MostDiscussedMovie {
                title: "Mystery".to_string(),
                year: None,
                comment_count: 158,
            },
        ];
        let view = build(&OverviewStats::default(), &[], &discussed);
        assert_eq!(view.most_discussed[0].rank, 1);
        assert_eq!(view.most_discussed[0].comments, "161");
        assert_eq!(view.most_discussed[1].year, "N/A");
    }
}
