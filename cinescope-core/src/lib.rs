//! # cinescope-core
//!
//! Core library for cinescope - a read-only analytics dashboard over the
//! MFlix movie database.
//!
//! This library provides:
//! - Connection provider for the document store
//! - Aggregation pipeline builders and typed query functions (the catalog)
//! - Fixed-TTL memoization of query results with an injectable clock
//! - Pure, toolkit-neutral view models for the six dashboard pages
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way:
//! view builder → catalog → store → rows → view model → renderer
//!
//! The store is never written; the memoization cache is the only mutable
//! state, and a single render pass owns it at a time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cinescope_core::{Catalog, Config, Store};
//!
//! # async fn example() -> cinescope_core::Result<()> {
//! let config = Config::load()?;
//! let store = Store::connect(&config.store).await?;
//! let mut catalog = Catalog::new(store, config.cache, config.limits);
//!
//! let stats = catalog.overview_stats().await?;
//! println!("{} movies", stats.total_movies);
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use cache::{Clock, SystemClock, TtlCache};
pub use config::Config;
pub use db::{Catalog, Store};
pub use error::{Error, Result};
pub use pages::Page;
pub use types::*;

// Public modules
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod pages;
pub mod types;
pub mod view;
