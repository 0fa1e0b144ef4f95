//! Aggregation pipeline builders.
//!
//! Every computation the dashboard shows is pushed server-side: these
//! builders produce the pipelines, and a trailing `$project` names the
//! output columns so rows deserialize straight into the types in
//! [`crate::types`].
//!
//! Shared conventions:
//! - Fields are existence-filtered before any aggregation stage; missing
//!   values are excluded, never defaulted.
//! - Every pipeline whose output feeds a list or chart ends in a hard
//!   `$limit`.

use mongodb::bson::{doc, Document};

use crate::types::SearchFilters;

/// Average IMDb rating across all rated movies.
pub fn avg_rating() -> Vec<Document> {
    vec![
        doc! { "$match": { "imdb.rating": { "$exists": true, "$ne": null } } },
        doc! { "$group": { "_id": null, "avg_rating": { "$avg": "$imdb.rating" } } },
    ]
}

/// Movie count per genre, most common first.
pub fn genre_distribution(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "genres": { "$exists": true, "$ne": [] } } },
        doc! { "$unwind": "$genres" },
        doc! { "$group": { "_id": "$genres", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": limit },
        doc! { "$project": { "_id": 0, "genre": "$_id", "count": 1 } },
    ]
}

/// A capped sample of raw IMDb ratings for the histogram.
pub fn rating_distribution(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "imdb.rating": { "$exists": true, "$ne": null } } },
        doc! { "$project": { "_id": 0, "rating": "$imdb.rating" } },
        doc! { "$limit": limit },
    ]
}

/// Movie count per release decade, chronological.
///
/// Pre-1900 years are noise in the source data and excluded.
pub fn movies_by_decade() -> Vec<Document> {
    vec![
        doc! { "$match": { "year": { "$exists": true, "$ne": null, "$gte": 1900 } } },
        doc! { "$project": { "decade": { "$subtract": ["$year", { "$mod": ["$year", 10] }] } } },
        doc! { "$group": { "_id": "$decade", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
        doc! { "$project": { "_id": 0, "decade": "$_id", "count": 1 } },
    ]
}

/// Top-rated movies with at least `min_votes` votes, best first.
pub fn top_rated(min_votes: i64, limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": {
            "imdb.rating": { "$exists": true, "$ne": null },
            "imdb.votes": { "$gte": min_votes },
        } },
        doc! { "$project": {
            "_id": 0,
            "title": 1,
            "year": 1,
            "genres": 1,
            "rating": "$imdb.rating",
            "votes": "$imdb.votes",
        } },
        doc! { "$sort": { "rating": -1 } },
        doc! { "$limit": limit },
    ]
}

/// Average rating and movie count per genre, best-rated first.
///
/// Genres with fewer than `floor` rated movies are dropped so a handful
/// of titles cannot dominate the ranking.
pub fn genre_performance(floor: i64, limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": {
            "genres": { "$exists": true, "$ne": [] },
            "imdb.rating": { "$exists": true, "$ne": null },
        } },
        doc! { "$unwind": "$genres" },
        doc! { "$group": {
            "_id": "$genres",
            "avg_rating": { "$avg": "$imdb.rating" },
            "count": { "$sum": 1 },
        } },
        doc! { "$match": { "count": { "$gte": floor } } },
        doc! { "$sort": { "avg_rating": -1 } },
        doc! { "$limit": limit },
        doc! { "$project": { "_id": 0, "genre": "$_id", "avg_rating": 1, "count": 1 } },
    ]
}

/// Average rating per decade from 1950 on, chronological.
pub fn rating_trend() -> Vec<Document> {
    vec![
        doc! { "$match": {
            "year": { "$exists": true, "$ne": null, "$gte": 1950 },
            "imdb.rating": { "$exists": true, "$ne": null },
        } },
        doc! { "$project": {
            "decade": { "$subtract": ["$year", { "$mod": ["$year", 10] }] },
            "rating": "$imdb.rating",
        } },
        doc! { "$group": {
            "_id": "$decade",
            "avg_rating": { "$avg": "$rating" },
            "count": { "$sum": 1 },
        } },
        doc! { "$sort": { "_id": 1 } },
        doc! { "$project": { "_id": 0, "decade": "$_id", "avg_rating": 1, "count": 1 } },
    ]
}

/// Theater city/state/coordinates rows.
///
/// Coordinates are left raw; per-record validation happens at view time.
pub fn theater_locations(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "location.geo.coordinates": { "$exists": true } } },
        doc! { "$project": {
            "_id": 0,
            "city": "$location.address.city",
            "state": "$location.address.state",
            "coordinates": "$location.geo.coordinates",
        } },
        doc! { "$limit": limit },
    ]
}

/// Theater count per state, largest first.
pub fn theaters_by_state(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "location.address.state": { "$exists": true } } },
        doc! { "$group": { "_id": "$location.address.state", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": limit },
        doc! { "$project": { "_id": 0, "state": "$_id", "count": 1 } },
    ]
}

/// Comment count per calendar month, chronological.
pub fn comment_trends(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "date": { "$exists": true } } },
        doc! { "$project": {
            "year": { "$year": "$date" },
            "month": { "$month": "$date" },
        } },
        doc! { "$group": {
            "_id": { "year": "$year", "month": "$month" },
            "count": { "$sum": 1 },
        } },
        doc! { "$sort": { "_id.year": 1, "_id.month": 1 } },
        doc! { "$limit": limit },
        doc! { "$project": {
            "_id": 0,
            "year": "$_id.year",
            "month": "$_id.month",
            "count": 1,
        } },
    ]
}

/// Movies ranked by comment count, joined back to their titles.
pub fn most_discussed(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$movie_id", "comment_count": { "$sum": 1 } } },
        doc! { "$sort": { "comment_count": -1 } },
        doc! { "$limit": limit },
        doc! { "$lookup": {
            "from": "movies",
            "localField": "_id",
            "foreignField": "_id",
            "as": "movie",
        } },
        doc! { "$unwind": "$movie" },
        doc! { "$project": {
            "_id": 0,
            "title": "$movie.title",
            "year": "$movie.year",
            "comment_count": 1,
        } },
    ]
}

/// Movie search: the conjunction of whatever filters are supplied.
pub fn search_movies(filters: &SearchFilters, limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": search_match(filters) },
        doc! { "$project": {
            "_id": 0,
            "title": 1,
            "year": 1,
            "genres": 1,
            "rating": "$imdb.rating",
            "plot": 1,
        } },
        doc! { "$limit": limit },
    ]
}

/// Build the `$match` document for a search.
///
/// Every supplied filter narrows the set; none supplied matches all
/// movies. The title filter is a case-insensitive substring match, so
/// regex metacharacters in user input are escaped to keep it literal.
pub fn search_match(filters: &SearchFilters) -> Document {
    let mut condition = Document::new();

    if let Some(title) = &filters.title {
        if !title.is_empty() {
            condition.insert(
                "title",
                doc! { "$regex": escape_regex(title), "$options": "i" },
            );
        }
    }

    if let Some(genre) = &filters.genre {
        condition.insert("genres", genre.clone());
    }

    if let Some((from, to)) = filters.year_range {
        condition.insert("year", doc! { "$gte": from, "$lte": to });
    }

    condition
}

/// Escape regex metacharacters so a pattern matches its input literally.
fn escape_regex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Last stage of a pipeline that should be capped.
    fn limit_of(pipeline: &[Document]) -> Option<i64> {
        pipeline
            .iter()
            .find_map(|stage| stage.get("$limit").and_then(|v| v.as_i64()))
    }

    #[test]
    fn test_capped_pipelines_carry_their_limit() {
        assert_eq!(limit_of(&genre_distribution(20)), Some(20));
        assert_eq!(limit_of(&rating_distribution(10_000)), Some(10_000));
        assert_eq!(limit_of(&top_rated(1000, 10)), Some(10));
        assert_eq!(limit_of(&genre_performance(50, 15)), Some(15));
        assert_eq!(limit_of(&theater_locations(500)), Some(500));
        assert_eq!(limit_of(&theaters_by_state(15)), Some(15));
        assert_eq!(limit_of(&comment_trends(100)), Some(100));
        assert_eq!(limit_of(&most_discussed(10)), Some(10));
        assert_eq!(limit_of(&search_movies(&SearchFilters::default(), 50)), Some(50));
    }

    #[test]
    fn test_top_rated_sorts_by_rating_desc_and_filters_votes() {
        let pipeline = top_rated(1000, 10);

        let matched = pipeline[0].get_document("$match").unwrap();
        assert_eq!(
            matched.get_document("imdb.votes").unwrap(),
            &doc! { "$gte": 1000_i64 }
        );

        let sort = pipeline
            .iter()
            .find_map(|stage| stage.get_document("$sort").ok())
            .unwrap();
        assert_eq!(sort, &doc! { "rating": -1 });
    }

    #[test]
    fn test_unwind_pipelines_filter_existence_first() {
        for pipeline in [genre_distribution(20), genre_performance(50, 15)] {
            let first = &pipeline[0];
            let matched = first.get_document("$match").unwrap();
            let genres = matched.get_document("genres").unwrap();
            assert_eq!(genres.get_bool("$exists").unwrap(), true);
            // The unwind comes after the match, never before
            assert!(pipeline[1].contains_key("$unwind"));
        }
    }

    #[test]
    fn test_search_match_empty_filters_matches_everything() {
        let condition = search_match(&SearchFilters::default());
        assert!(condition.is_empty());
    }

    #[test]
    fn test_search_match_is_a_pure_conjunction() {
        let filters = SearchFilters {
            title: Some("god".to_string()),
            genre: Some("Drama".to_string()),
            year_range: Some((1990, 2020)),
        };
        let condition = search_match(&filters);

        // All three constraints present, as siblings (implicit AND), and
        // nothing else
        assert_eq!(condition.len(), 3);
        assert_eq!(
            condition.get_document("title").unwrap(),
            &doc! { "$regex": "god", "$options": "i" }
        );
        assert_eq!(condition.get_str("genres").unwrap(), "Drama");
        assert_eq!(
            condition.get_document("year").unwrap(),
            &doc! { "$gte": 1990, "$lte": 2020 }
        );
        assert!(condition.get("$or").is_none());
    }

    #[test]
    fn test_search_match_skips_empty_title() {
        let filters = SearchFilters {
            title: Some(String::new()),
            genre: None,
            year_range: None,
        };
        assert!(search_match(&filters).is_empty());
    }

    #[test]
    fn test_search_title_regex_is_literal() {
        let filters = SearchFilters {
            title: Some("2001: a space odyssey (uncut).".to_string()),
            ..Default::default()
        };
        let condition = search_match(&filters);
        let regex = condition
            .get_document("title")
            .unwrap()
            .get_str("$regex")
            .unwrap();
        assert_eq!(regex, "2001: a space odyssey \\(uncut\\)\\.");
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("plain title"), "plain title");
        assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
        assert_eq!(escape_regex("[x]{2}|y\\z"), "\\[x\\]\\{2\\}\\|y\\\\z");
    }

    #[test]
    fn test_decade_buckets_computed_server_side() {
        let pipeline = movies_by_decade();
        let project = pipeline[1].get_document("$project").unwrap();
        let decade = project.get_document("decade").unwrap();
        assert!(decade.contains_key("$subtract"));
    }

    #[test]
    fn test_most_discussed_joins_movies() {
        let pipeline = most_discussed(10);
        let lookup = pipeline
            .iter()
            .find_map(|stage| stage.get_document("$lookup").ok())
            .unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "movies");
        assert_eq!(lookup.get_str("localField").unwrap(), "_id");
    }

    #[test]
    fn test_projected_columns_match_row_types() {
        // The trailing $project names exactly the columns the row structs
        // deserialize into
        let pipeline = genre_distribution(20);
        let project = pipeline.last().unwrap().get_document("$project").unwrap();
        assert!(project.contains_key("genre"));
        assert!(project.contains_key("count"));
        assert_eq!(project.get_i32("_id").unwrap(), 0);

        let pipeline = comment_trends(100);
        let project = pipeline.last().unwrap().get_document("$project").unwrap();
        assert!(project.contains_key("year"));
        assert!(project.contains_key("month"));
        assert!(project.contains_key("count"));
    }
}
