//! The finite set of dashboard pages.
//!
//! Page selection is the only navigation state in the system: every
//! render is a single stateless pass over `(page, filters)`.

use serde::Serialize;

/// Dashboard pages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Overview,
    MovieAnalytics,
    TemporalTrends,
    Geographic,
    Engagement,
    Search,
}

impl Page {
    /// All pages, in tab order.
    pub fn all() -> [Page; 6] {
        [
            Page::Overview,
            Page::MovieAnalytics,
            Page::TemporalTrends,
            Page::Geographic,
            Page::Engagement,
            Page::Search,
        ]
    }

    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::MovieAnalytics => "Movie Analytics",
            Page::TemporalTrends => "Temporal Trends",
            Page::Geographic => "Geographic View",
            Page::Engagement => "User Engagement",
            Page::Search => "Search Movies",
        }
    }

    /// Stable identifier used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::MovieAnalytics => "analytics",
            Page::TemporalTrends => "trends",
            Page::Geographic => "geographic",
            Page::Engagement => "engagement",
            Page::Search => "search",
        }
    }

    /// Parse a page from its slug.
    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::all().into_iter().find(|p| p.slug() == slug)
    }

    /// Next page in tab order, wrapping around.
    pub fn next(&self) -> Page {
        let pages = Page::all();
        let idx = pages.iter().position(|p| p == self).unwrap_or(0);
        pages[(idx + 1) % pages.len()]
    }

    /// Previous page in tab order, wrapping around.
    pub fn prev(&self) -> Page {
        let pages = Page::all();
        let idx = pages.iter().position(|p| p == self).unwrap_or(0);
        pages[(idx + pages.len() - 1) % pages.len()]
    }
}
