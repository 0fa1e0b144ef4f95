//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/cinescope/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/cinescope/` (~/.config/cinescope/)
//! - State/Logs: `$XDG_STATE_HOME/cinescope/` (~/.local/state/cinescope/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Document store connection settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Query result cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Hard caps applied to every query result set
    #[serde(default)]
    pub limits: Limits,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document store connection settings
///
/// The URI can also be supplied via the `CINESCOPE_URI` environment
/// variable, which takes precedence over the config file (keeps
/// credentials out of the file).
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Connection URI (mongodb:// or mongodb+srv://)
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name (case-sensitive)
    #[serde(default = "default_database")]
    pub database: String,

    /// Server selection timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub server_selection_timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            server_selection_timeout_secs: default_store_timeout(),
            connect_timeout_secs: default_store_timeout(),
        }
    }
}

impl StoreConfig {
    /// Returns the effective URI, honoring the `CINESCOPE_URI` env var.
    pub fn effective_uri(&self) -> String {
        std::env::var("CINESCOPE_URI").unwrap_or_else(|_| self.uri.clone())
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "sample_mflix".to_string()
}

fn default_store_timeout() -> u64 {
    60
}

/// Query result cache settings
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CacheConfig {
    /// Seconds a cached query result stays fresh
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Hard caps on result set sizes
///
/// These bound transfer size from the store; they are deliberate
/// ceilings, not tuning suggestions.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Limits {
    /// Genre distribution rows
    #[serde(default = "default_genre_limit")]
    pub genres: i64,

    /// Rating samples pulled for the histogram
    #[serde(default = "default_rating_sample")]
    pub rating_samples: i64,

    /// Top-rated list length
    #[serde(default = "default_top_rated_limit")]
    pub top_rated: i64,

    /// Minimum vote count for the top-rated list
    #[serde(default = "default_min_votes")]
    pub min_votes: i64,

    /// Genre performance rows (and its minimum per-genre movie count)
    #[serde(default = "default_genre_perf_limit")]
    pub genre_performance: i64,
    #[serde(default = "default_genre_perf_floor")]
    pub genre_performance_floor: i64,

    /// Theater location rows fetched
    #[serde(default = "default_theater_limit")]
    pub theaters: i64,

    /// Theater markers actually rendered on the map
    #[serde(default = "default_map_marker_limit")]
    pub map_markers: usize,

    /// Theaters-by-state rows
    #[serde(default = "default_state_limit")]
    pub states: i64,

    /// Comment trend data points
    #[serde(default = "default_comment_trend_limit")]
    pub comment_trend: i64,

    /// Most-discussed movie rows
    #[serde(default = "default_most_discussed_limit")]
    pub most_discussed: i64,

    /// Search result rows
    #[serde(default = "default_search_limit")]
    pub search: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            genres: default_genre_limit(),
            rating_samples: default_rating_sample(),
            top_rated: default_top_rated_limit(),
            min_votes: default_min_votes(),
            genre_performance: default_genre_perf_limit(),
            genre_performance_floor: default_genre_perf_floor(),
            theaters: default_theater_limit(),
            map_markers: default_map_marker_limit(),
            states: default_state_limit(),
            comment_trend: default_comment_trend_limit(),
            most_discussed: default_most_discussed_limit(),
            search: default_search_limit(),
        }
    }
}

fn default_genre_limit() -> i64 {
    20
}

fn default_rating_sample() -> i64 {
    10_000
}

fn default_top_rated_limit() -> i64 {
    20
}

fn default_min_votes() -> i64 {
    1000
}

fn default_genre_perf_limit() -> i64 {
    15
}

fn default_genre_perf_floor() -> i64 {
    50
}

fn default_theater_limit() -> i64 {
    500
}

fn default_map_marker_limit() -> usize {
    200
}

fn default_state_limit() -> i64 {
    15
}

fn default_comment_trend_limit() -> i64 {
    100
}

fn default_most_discussed_limit() -> i64 {
    10
}

fn default_search_limit() -> i64 {
    50
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/cinescope/config.toml` (~/.config/cinescope/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("cinescope").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/cinescope/` (~/.local/state/cinescope/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("cinescope")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("cinescope.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.database, "sample_mflix");
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.limits.genres, 20);
        assert_eq!(config.limits.map_markers, 200);
        assert_eq!(config.limits.search, 50);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[store]
uri = "mongodb://db.example.com:27017"
database = "mflix_staging"

[cache]
ttl_secs = 120

[limits]
top_rated = 10
min_votes = 5000

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.store.uri, "mongodb://db.example.com:27017");
        assert_eq!(config.store.database, "mflix_staging");
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.limits.top_rated, 10);
        assert_eq!(config.limits.min_votes, 5000);
        // Unspecified limits keep their defaults
        assert_eq!(config.limits.theaters, 500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[cache]\nttl_secs = 42").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.cache.ttl_secs, 42);
        assert_eq!(config.store.database, "sample_mflix");
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = PathBuf::from("/nonexistent/cinescope/config.toml");
        assert!(Config::load_from(&path).is_err());
    }
}
