//! Pure view-model builders.
//!
//! Each page has one builder that turns query rows into a toolkit-neutral
//! view model: no I/O, no rendering types, nothing beyond cosmetic
//! relabeling (column renames, string joins, ratios reducible from two
//! counts). The TUI renders these; the `--dump` mode serializes them.

pub mod analytics;
pub mod engagement;
pub mod geographic;
pub mod overview;
pub mod search;
pub mod trends;

use serde::Serialize;

/// A labeled headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

impl MetricTile {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A labeled bar in a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}
