//! The catalog: typed, memoized query functions over the store.
//!
//! Each operation builds one pipeline, runs it server-side, deserializes
//! the rows, and memoizes the result keyed by query identity plus
//! argument values. The TTL is the only invalidation mechanism.

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::{self, Document};
use serde::de::DeserializeOwned;

use crate::cache::{Clock, TtlCache};
use crate::config::{CacheConfig, Limits};
use crate::db::{pipelines, store, Store};
use crate::error::Result;
use crate::types::*;

/// Memoization key: query identity plus argument values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    OverviewStats,
    GenreDistribution,
    RatingDistribution,
    MoviesByDecade,
    TopRated { min_votes: i64, limit: i64 },
    GenrePerformance,
    RatingTrend,
    TheaterLocations,
    TheatersByState,
    CommentTrends,
    MostDiscussed,
    Search(SearchFilters),
    DistinctGenres,
}

/// Cached result payload, one variant per query shape.
#[derive(Debug, Clone)]
enum QueryResult {
    Stats(OverviewStats),
    Genres(Vec<GenreCount>),
    Ratings(Vec<f64>),
    Decades(Vec<DecadeCount>),
    TopRated(Vec<TopRatedMovie>),
    GenrePerformance(Vec<GenrePerformance>),
    RatingTrend(Vec<RatingTrendPoint>),
    Theaters(Vec<TheaterLocation>),
    States(Vec<StateCount>),
    CommentTrend(Vec<CommentTrendPoint>),
    MostDiscussed(Vec<MostDiscussedMovie>),
    Movies(Vec<MovieHit>),
    GenreList(Vec<String>),
}

/// Read-only query layer owning the store handle and the result cache.
pub struct Catalog {
    store: Store,
    cache: TtlCache<QueryKey, QueryResult>,
    limits: Limits,
}

impl Catalog {
    /// Build a catalog with the system clock.
    pub fn new(store: Store, cache: CacheConfig, limits: Limits) -> Self {
        Self {
            store,
            cache: TtlCache::new(Duration::from_secs(cache.ttl_secs)),
            limits,
        }
    }

    /// Build a catalog with an explicit clock (tests).
    pub fn with_clock(
        store: Store,
        cache: CacheConfig,
        limits: Limits,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            cache: TtlCache::with_clock(Duration::from_secs(cache.ttl_secs), clock),
            limits,
        }
    }

    /// The configured result caps.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Deserialize aggregation rows into a typed vector.
    fn decode_rows<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>> {
        docs.into_iter()
            .map(|doc| bson::from_document(doc).map_err(Into::into))
            .collect()
    }

    /// Headline counts plus the global average rating.
    pub async fn overview_stats(&mut self) -> Result<OverviewStats> {
        let key = QueryKey::OverviewStats;
        if let Some(QueryResult::Stats(stats)) = self.cache.get(&key) {
            tracing::debug!("overview_stats served from cache");
            return Ok(stats.clone());
        }

        let total_movies = self.store.count(store::MOVIES).await?;
        let total_users = self.store.count(store::USERS).await?;
        let total_comments = self.store.count(store::COMMENTS).await?;
        let total_theaters = self.store.count(store::THEATERS).await?;

        let rows = self
            .store
            .aggregate(store::MOVIES, pipelines::avg_rating())
            .await?;
        let avg_rating = rows
            .first()
            .and_then(|doc| doc.get("avg_rating"))
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        let stats = OverviewStats {
            total_movies,
            total_users,
            total_comments,
            total_theaters,
            avg_rating,
        };
        self.cache.insert(key, QueryResult::Stats(stats.clone()));
        Ok(stats)
    }

    /// Movie count per genre, capped at `limits.genres` rows.
    pub async fn genre_distribution(&mut self) -> Result<Vec<GenreCount>> {
        let key = QueryKey::GenreDistribution;
        if let Some(QueryResult::Genres(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(store::MOVIES, pipelines::genre_distribution(self.limits.genres))
            .await?;
        let rows: Vec<GenreCount> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::Genres(rows.clone()));
        Ok(rows)
    }

    /// A capped sample of IMDb ratings.
    pub async fn rating_distribution(&mut self) -> Result<Vec<f64>> {
        let key = QueryKey::RatingDistribution;
        if let Some(QueryResult::Ratings(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::MOVIES,
                pipelines::rating_distribution(self.limits.rating_samples),
            )
            .await?;
        let samples: Vec<RatingSample> = Self::decode_rows(docs)?;
        let rows: Vec<f64> = samples.into_iter().map(|s| s.rating).collect();

        self.cache.insert(key, QueryResult::Ratings(rows.clone()));
        Ok(rows)
    }

    /// Movie count per decade since 1900.
    pub async fn movies_by_decade(&mut self) -> Result<Vec<DecadeCount>> {
        let key = QueryKey::MoviesByDecade;
        if let Some(QueryResult::Decades(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(store::MOVIES, pipelines::movies_by_decade())
            .await?;
        let rows: Vec<DecadeCount> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::Decades(rows.clone()));
        Ok(rows)
    }

    /// Top-rated movies with at least `min_votes` votes.
    pub async fn top_rated(&mut self, min_votes: i64, limit: i64) -> Result<Vec<TopRatedMovie>> {
        let key = QueryKey::TopRated { min_votes, limit };
        if let Some(QueryResult::TopRated(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(store::MOVIES, pipelines::top_rated(min_votes, limit))
            .await?;
        let rows: Vec<TopRatedMovie> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::TopRated(rows.clone()));
        Ok(rows)
    }

    /// Average rating and count per genre with enough rated movies.
    pub async fn genre_performance(&mut self) -> Result<Vec<GenrePerformance>> {
        let key = QueryKey::GenrePerformance;
        if let Some(QueryResult::GenrePerformance(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::MOVIES,
                pipelines::genre_performance(
                    self.limits.genre_performance_floor,
                    self.limits.genre_performance,
                ),
            )
            .await?;
        let rows: Vec<GenrePerformance> = Self::decode_rows(docs)?;

        self.cache
            .insert(key, QueryResult::GenrePerformance(rows.clone()));
        Ok(rows)
    }

    /// Per-decade average rating since 1950.
    pub async fn rating_trend(&mut self) -> Result<Vec<RatingTrendPoint>> {
        let key = QueryKey::RatingTrend;
        if let Some(QueryResult::RatingTrend(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(store::MOVIES, pipelines::rating_trend())
            .await?;
        let rows: Vec<RatingTrendPoint> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::RatingTrend(rows.clone()));
        Ok(rows)
    }

    /// Raw theater locations, capped at `limits.theaters` rows.
    pub async fn theater_locations(&mut self) -> Result<Vec<TheaterLocation>> {
        let key = QueryKey::TheaterLocations;
        if let Some(QueryResult::Theaters(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::THEATERS,
                pipelines::theater_locations(self.limits.theaters),
            )
            .await?;
        let rows: Vec<TheaterLocation> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::Theaters(rows.clone()));
        Ok(rows)
    }

    /// Theater count per state.
    pub async fn theaters_by_state(&mut self) -> Result<Vec<StateCount>> {
        let key = QueryKey::TheatersByState;
        if let Some(QueryResult::States(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::THEATERS,
                pipelines::theaters_by_state(self.limits.states),
            )
            .await?;
        let rows: Vec<StateCount> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::States(rows.clone()));
        Ok(rows)
    }

    /// Comment volume per calendar month.
    pub async fn comment_trends(&mut self) -> Result<Vec<CommentTrendPoint>> {
        let key = QueryKey::CommentTrends;
        if let Some(QueryResult::CommentTrend(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::COMMENTS,
                pipelines::comment_trends(self.limits.comment_trend),
            )
            .await?;
        let rows: Vec<CommentTrendPoint> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::CommentTrend(rows.clone()));
        Ok(rows)
    }

    /// Movies with the most comments.
    pub async fn most_discussed(&mut self) -> Result<Vec<MostDiscussedMovie>> {
        let key = QueryKey::MostDiscussed;
        if let Some(QueryResult::MostDiscussed(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let docs = self
            .store
            .aggregate(
                store::COMMENTS,
                pipelines::most_discussed(self.limits.most_discussed),
            )
            .await?;
        let rows: Vec<MostDiscussedMovie> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::MostDiscussed(rows.clone()));
        Ok(rows)
    }

    /// Search movies by the conjunction of the supplied filters.
    pub async fn search_movies(&mut self, filters: &SearchFilters) -> Result<Vec<MovieHit>> {
        let key = QueryKey::Search(filters.clone());
        if let Some(QueryResult::Movies(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        tracing::info!(?filters, "Running movie search");
        let docs = self
            .store
            .aggregate(
                store::MOVIES,
                pipelines::search_movies(filters, self.limits.search),
            )
            .await?;
        let rows: Vec<MovieHit> = Self::decode_rows(docs)?;

        self.cache.insert(key, QueryResult::Movies(rows.clone()));
        Ok(rows)
    }

    /// Every genre tag in the collection, sorted, for the dropdown.
    pub async fn distinct_genres(&mut self) -> Result<Vec<String>> {
        let key = QueryKey::DistinctGenres;
        if let Some(QueryResult::GenreList(rows)) = self.cache.get(&key) {
            return Ok(rows.clone());
        }

        let rows = self.store.distinct_strings(store::MOVIES, "genres").await?;

        self.cache.insert(key, QueryResult::GenreList(rows.clone()));
        Ok(rows)
    }
}
