//! Geographic page: theater map markers and state distribution.
//!
//! The store keeps coordinates as `[longitude, latitude]`; map rendering
//! wants `(latitude, longitude)`, so the pair is flipped here. A record
//! with a missing, short, or non-numeric pair is skipped individually —
//! one bad theater never aborts the map.

use mongodb::bson::Bson;
use serde::Serialize;

use crate::types::{StateCount, TheaterLocation};
use crate::view::Bar;

/// One marker on the map, already in (lat, lon) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    /// "City, ST" popup label
    pub label: String,
}

/// View model for the Geographic page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicView {
    pub points: Vec<MapPoint>,
    pub states: Vec<Bar>,
    /// How many fetched theaters were dropped for bad coordinates
    pub skipped: usize,
}

/// Build the Geographic view model, rendering at most `marker_cap`
/// points.
pub fn build(theaters: &[TheaterLocation], states: &[StateCount], marker_cap: usize) -> GeographicView {
    let mut points = Vec::new();
    let mut skipped = 0;

    for theater in theaters {
        if points.len() >= marker_cap {
            break;
        }
        match coordinate_pair(theater) {
            Some((lat, lon)) => points.push(MapPoint {
                lat,
                lon,
                label: place_label(theater),
            }),
            None => skipped += 1,
        }
    }

    let states = states
        .iter()
        .map(|s| Bar {
            label: s.state.clone(),
            value: s.count.max(0) as u64,
        })
        .collect();

    GeographicView {
        points,
        states,
        skipped,
    }
}

/// Extract and flip a theater's coordinate pair.
fn coordinate_pair(theater: &TheaterLocation) -> Option<(f64, f64)> {
    let coords = theater.coordinates.as_ref()?;
    if coords.len() < 2 {
        return None;
    }
    let lon = bson_number(&coords[0])?;
    let lat = bson_number(&coords[1])?;
    Some((lat, lon))
}

/// Numeric BSON value as f64; anything else is a parse failure.
fn bson_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn place_label(theater: &TheaterLocation) -> String {
    let city = theater.city.as_deref().unwrap_or("Unknown");
    match theater.state.as_deref() {
        Some(state) if !state.is_empty() => format!("{}, {}", city, state),
        _ => city.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theater(coords: Option<Vec<Bson>>) -> TheaterLocation {
        TheaterLocation {
            city: Some("Bloomington".to_string()),
            state: Some("MN".to_string()),
            coordinates: coords,
        }
    }

    #[test]
    fn test_coordinates_are_flipped() {
        let theaters = vec![theater(Some(vec![
            Bson::Double(-93.24565),
            Bson::Double(44.85466),
        ]))];
        let view = build(&theaters, &[], 200);

        assert_eq!(view.points.len(), 1);
        assert_eq!(view.points[0].lat, 44.85466);
        assert_eq!(view.points[0].lon, -93.24565);
        assert_eq!(view.points[0].label, "Bloomington, MN");
    }

    #[test]
    fn test_bad_pairs_are_skipped_not_fatal() {
        let theaters = vec![
            theater(None),
            theater(Some(vec![Bson::Double(-93.0)])),
            theater(Some(vec![
                Bson::String("x".to_string()),
                Bson::Double(44.0),
            ])),
            theater(Some(vec![Bson::Double(-93.0), Bson::Null])),
            theater(Some(vec![Bson::Double(-93.0), Bson::Double(44.0)])),
        ];
        let view = build(&theaters, &[], 200);

        assert_eq!(view.points.len(), 1);
        assert_eq!(view.skipped, 4);
    }

    #[test]
    fn test_marker_cap() {
        let theaters: Vec<TheaterLocation> = (0..300)
            .map(|i| theater(Some(vec![Bson::Double(-93.0 + i as f64 * 0.01), Bson::Double(44.0)])))
            .collect();
        let view = build(&theaters, &[], 200);
        assert_eq!(view.points.len(), 200);
    }

    #[test]
    fn test_integer_coordinates_accepted() {
        let theaters = vec![theater(Some(vec![Bson::Int32(-93), Bson::Int64(44)]))];
        let view = build(&theaters, &[], 200);
        assert_eq!(view.points[0], MapPoint {
            lat: 44.0,
            lon: -93.0,
            label: "Bloomington, MN".to_string(),
        });
    }

    #[test]
    fn test_state_bars() {
        let states = vec![StateCount { state: "CA".to_string(), count: 169 }];
        let view = build(&[], &states, 200);
        assert_eq!(view.states[0].label, "CA");
        assert_eq!(view.states[0].value, 169);
    }
}
