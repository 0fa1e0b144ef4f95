//! Application state for the TUI.

use cinescope_core::config::Limits;
use cinescope_core::types::SearchFilters;
use cinescope_core::view::analytics::MovieAnalyticsView;
use cinescope_core::view::engagement::EngagementView;
use cinescope_core::view::geographic::GeographicView;
use cinescope_core::view::overview::OverviewView;
use cinescope_core::view::search::SearchView;
use cinescope_core::view::trends::TrendsView;
use cinescope_core::{view, Catalog, Page, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;

/// Slider bounds for the year-range filter.
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2020;
/// Step for year-range adjustments.
const YEAR_STEP: i32 = 5;

/// Work the key handler asks the async loop to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Fetch data for the currently selected page
    LoadPage,
    /// Run the movie search with the current filter form
    RunSearch,
}

/// Which search control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SearchFocus {
    #[default]
    Title,
    Genre,
    Years,
}

/// State of the search filter controls.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    /// Free-text title input
    pub input: String,
    /// Index into `genres`; 0 is "All"
    pub genre_idx: usize,
    pub year_from: i32,
    pub year_to: i32,
    pub focus: SearchFocus,
    /// True while keystrokes go into the title input
    pub editing: bool,
}

impl SearchForm {
    fn new() -> Self {
        Self {
            year_from: 1990,
            year_to: 2020,
            ..Default::default()
        }
    }

    /// The filters this form currently describes.
    pub fn filters(&self, genres: &[String]) -> SearchFilters {
        let title = if self.input.is_empty() {
            None
        } else {
            Some(self.input.clone())
        };
        // genre_idx 0 is the "All" entry, which is no constraint
        let genre = if self.genre_idx > 0 {
            genres.get(self.genre_idx - 1).cloned()
        } else {
            None
        };
        SearchFilters {
            title,
            genre,
            year_range: Some((self.year_from, self.year_to)),
        }
    }

    /// Label for the genre control ("All" or a genre tag).
    pub fn genre_label<'a>(&self, genres: &'a [String]) -> &'a str {
        if self.genre_idx == 0 {
            "All"
        } else {
            genres
                .get(self.genre_idx - 1)
                .map(String::as_str)
                .unwrap_or("All")
        }
    }
}

/// Main application state.
pub struct App {
    /// Query layer (owns the store handle and the result cache)
    catalog: Catalog,
    /// Result caps, copied out for the views
    limits: Limits,
    /// Currently selected page
    pub page: Page,
    /// Load error for the current page, if any
    pub error: Option<String>,

    // Per-page view models, populated on first visit
    pub overview: Option<OverviewView>,
    pub analytics: Option<MovieAnalyticsView>,
    pub trends: Option<TrendsView>,
    pub geographic: Option<GeographicView>,
    pub engagement: Option<EngagementView>,
    pub search: Option<SearchView>,

    /// Search filter controls
    pub form: SearchForm,
    /// Genre dropdown values (loaded with the Search page)
    pub genres: Vec<String>,
    /// Selection state for the search results table
    pub table_state: TableState,

    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App around a catalog.
    pub fn new(catalog: Catalog) -> Self {
        let limits = *catalog.limits();
        Self {
            catalog,
            limits,
            page: Page::default(),
            error: None,
            overview: None,
            analytics: None,
            trends: None,
            geographic: None,
            engagement: None,
            search: None,
            form: SearchForm::new(),
            genres: Vec::new(),
            table_state: TableState::default(),
            should_quit: false,
        }
    }

    /// Handle a key event; returns work for the async loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.page == Page::Search && self.form.editing {
            return self.handle_search_edit_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Right => self.switch_page(self.page.next()),
            KeyCode::BackTab | KeyCode::Left => self.switch_page(self.page.prev()),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.switch_page(Page::all()[idx])
            }
            KeyCode::Char('r') => Some(Action::LoadPage),
            _ if self.page == Page::Search => self.handle_search_key(key),
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            _ => None,
        }
    }

    /// Keys on the Search page outside title-editing mode.
    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('e') => {
                self.form.editing = true;
                self.form.focus = SearchFocus::Title;
                None
            }
            KeyCode::Char('g') => {
                // Cycle genre forward; index 0 is "All"
                self.form.genre_idx = (self.form.genre_idx + 1) % (self.genres.len() + 1);
                self.form.focus = SearchFocus::Genre;
                None
            }
            KeyCode::Char('G') => {
                let n = self.genres.len() + 1;
                self.form.genre_idx = (self.form.genre_idx + n - 1) % n;
                self.form.focus = SearchFocus::Genre;
                None
            }
            KeyCode::Char('[') => self.adjust_year_from(-YEAR_STEP),
            KeyCode::Char(']') => self.adjust_year_from(YEAR_STEP),
            KeyCode::Char('{') => self.adjust_year_to(-YEAR_STEP),
            KeyCode::Char('}') => self.adjust_year_to(YEAR_STEP),
            KeyCode::Enter => Some(Action::RunSearch),
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            _ => None,
        }
    }

    /// Keys while the title input has focus.
    fn handle_search_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.form.editing = false;
                None
            }
            KeyCode::Enter => {
                self.form.editing = false;
                Some(Action::RunSearch)
            }
            KeyCode::Backspace => {
                self.form.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.form.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn adjust_year_from(&mut self, by: i32) -> Option<Action> {
        self.form.focus = SearchFocus::Years;
        self.form.year_from = (self.form.year_from + by).clamp(YEAR_MIN, self.form.year_to);
        None
    }

    fn adjust_year_to(&mut self, by: i32) -> Option<Action> {
        self.form.focus = SearchFocus::Years;
        self.form.year_to = (self.form.year_to + by).clamp(self.form.year_from, YEAR_MAX);
        None
    }

    fn switch_page(&mut self, page: Page) -> Option<Action> {
        if page == self.page {
            return None;
        }
        self.page = page;
        self.error = None;
        self.table_state = TableState::default();
        Some(Action::LoadPage)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = match self.page {
            Page::Search => self.search.as_ref().map(|s| s.rows.len()).unwrap_or(0),
            Page::MovieAnalytics => self
                .analytics
                .as_ref()
                .map(|a| a.top_rated.len())
                .unwrap_or(0),
            _ => 0,
        };
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.table_state.select(Some(next));
    }

    /// Fetch and build the view model for the current page.
    ///
    /// Queries run through the catalog, so a revisit within the cache TTL
    /// is served without touching the store. Errors are surfaced in-page;
    /// other pages keep their data.
    pub async fn load_current_page(&mut self) {
        if let Err(err) = self.try_load_current_page().await {
            tracing::error!(page = self.page.slug(), error = %err, "Page load failed");
            self.error = Some(err.to_string());
        } else {
            self.error = None;
        }
    }

    async fn try_load_current_page(&mut self) -> Result<()> {
        match self.page {
            Page::Overview => {
                let stats = self.catalog.overview_stats().await?;
                let genres = self.catalog.genre_distribution().await?;
                let ratings = self.catalog.rating_distribution().await?;
                self.overview = Some(view::overview::build(&stats, &genres, &ratings));
            }
            Page::MovieAnalytics => {
                let top = self
                    .catalog
                    .top_rated(self.limits.min_votes, self.limits.top_rated)
                    .await?;
                let perf = self.catalog.genre_performance().await?;
                self.analytics = Some(view::analytics::build(&top, &perf));
            }
            Page::TemporalTrends => {
                let decades = self.catalog.movies_by_decade().await?;
                let trend = self.catalog.rating_trend().await?;
                self.trends = Some(view::trends::build(&decades, &trend));
            }
            Page::Geographic => {
                let theaters = self.catalog.theater_locations().await?;
                let states = self.catalog.theaters_by_state().await?;
                self.geographic = Some(view::geographic::build(
                    &theaters,
                    &states,
                    self.limits.map_markers,
                ));
            }
            Page::Engagement => {
                let stats = self.catalog.overview_stats().await?;
                let trend = self.catalog.comment_trends().await?;
                let discussed = self.catalog.most_discussed().await?;
                self.engagement = Some(view::engagement::build(&stats, &trend, &discussed));
            }
            Page::Search => {
                // The dropdown needs the genre list; results wait for an
                // explicit search
                if self.genres.is_empty() {
                    self.genres = self.catalog.distinct_genres().await?;
                }
            }
        }
        Ok(())
    }

    /// Run the movie search with the current form.
    pub async fn run_search(&mut self) {
        let filters = self.form.filters(&self.genres);
        match self.catalog.search_movies(&filters).await {
            Ok(hits) => {
                self.search = Some(view::search::build(&hits));
                self.table_state = TableState::default();
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "Search failed");
                self.error = Some(err.to_string());
            }
        }
    }
}
