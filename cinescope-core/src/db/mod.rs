//! Document store layer for cinescope
//!
//! This module provides read-only access to the MFlix collections:
//! - Connection provider with uniform timeouts
//! - Pure aggregation pipeline builders
//! - The catalog: memoized, typed query functions

pub mod catalog;
pub mod pipelines;
pub mod store;

pub use catalog::{Catalog, QueryKey};
pub use store::{Store, COMMENTS, MOVIES, THEATERS, USERS};
