//! Temporal Trends page: production volume and ratings by decade.

use serde::Serialize;

use crate::types::{DecadeCount, RatingTrendPoint};
use crate::view::Bar;

/// One point on the per-decade rating line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingByDecade {
    pub decade: i32,
    pub avg_rating: f64,
    pub count: i64,
}

/// View model for the Temporal Trends page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsView {
    /// Movie production volume per decade, chronological
    pub production: Vec<Bar>,
    /// Average rating per decade since 1950, chronological
    pub rating_trend: Vec<RatingByDecade>,
}

/// Build the Temporal Trends view model.
pub fn build(decades: &[DecadeCount], trend: &[RatingTrendPoint]) -> TrendsView {
    let production = decades
        .iter()
        .map(|d| Bar {
            label: format!("{}s", d.decade),
            value: d.count.max(0) as u64,
        })
        .collect();

    let rating_trend = trend
        .iter()
        .map(|p| RatingByDecade {
            decade: p.decade,
            avg_rating: p.avg_rating,
            count: p.count,
        })
        .collect();

    TrendsView {
        production,
        rating_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_labels() {
        let decades = vec![
            DecadeCount { decade: 1980, count: 1200 },
            DecadeCount { decade: 1990, count: 2400 },
        ];
        let view = build(&decades, &[]);
        assert_eq!(view.production[0].label, "1980s");
        assert_eq!(view.production[1].value, 2400);
    }

    #[test]
    fn test_empty_is_valid() {
        let view = build(&[], &[]);
        assert!(view.production.is_empty());
        assert!(view.rating_trend.is_empty());
    }
}
