//! cinescope - MFlix Analytics Dashboard
//!
//! Terminal UI for exploring the MFlix movie database: overview metrics,
//! genre and rating analytics, temporal trends, theater geography, user
//! engagement, and interactive search.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cinescope_core::{Catalog, Config, Page, Store};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{Action, App};

#[derive(Parser, Debug)]
#[command(name = "cinescope", about = "MFlix analytics dashboard")]
struct Cli {
    /// Path to a config file (default: ~/.config/cinescope/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Connection URI override (also: CINESCOPE_URI env var)
    #[arg(long)]
    uri: Option<String>,

    /// Database name override
    #[arg(long)]
    database: Option<String>,

    /// Page to open (overview, analytics, trends, geographic, engagement, search)
    #[arg(long, default_value = "overview")]
    page: String,

    /// Print the page's view model as JSON and exit instead of starting the TUI
    #[arg(long)]
    dump: bool,

    /// Title filter for `--dump --page search`
    #[arg(long)]
    title: Option<String>,

    /// Genre filter for `--dump --page search`
    #[arg(long)]
    genre: Option<String>,

    /// Year range for `--dump --page search`, e.g. 1990:2020
    #[arg(long)]
    years: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then layer CLI overrides on top
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };
    if let Some(uri) = &cli.uri {
        config.store.uri = uri.clone();
    }
    if let Some(database) = &cli.database {
        config.store.database = database.clone();
    }

    // Initialize logging (to file, not stdout, since we own the terminal)
    let _log_guard =
        cinescope_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("cinescope starting up");

    let page = Page::from_slug(&cli.page)
        .with_context(|| format!("unknown page '{}' (try: overview, analytics, trends, geographic, engagement, search)", cli.page))?;

    // Connect before touching the terminal so a failure is a plain,
    // visible error rather than a broken TUI
    let store = Store::connect(&config.store)
        .await
        .context("failed to connect to the document store")?;
    let catalog = Catalog::new(store, config.cache, config.limits);
    let mut app = App::new(catalog);
    app.page = page;

    if cli.dump {
        return dump_page(&mut app, &cli).await;
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("cinescope shutting down");

    result
}

/// Run the main application loop.
///
/// Rendering is a single pass per frame; a page switch or search blocks
/// on its queries (memoized after the first load) before the next draw.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    app.load_current_page().await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match app.handle_key(key) {
                    Some(Action::LoadPage) => app.load_current_page().await,
                    Some(Action::RunSearch) => app.run_search().await,
                    None => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Headless mode: load one page, print its view model as JSON, exit.
async fn dump_page(app: &mut App, cli: &Cli) -> Result<()> {
    app.load_current_page().await;

    if app.page == Page::Search {
        apply_search_flags(app, cli)?;
        app.run_search().await;
    }

    if let Some(error) = &app.error {
        bail!("failed to load page '{}': {}", app.page.slug(), error);
    }

    let json = match app.page {
        Page::Overview => serde_json::to_string_pretty(&app.overview)?,
        Page::MovieAnalytics => serde_json::to_string_pretty(&app.analytics)?,
        Page::TemporalTrends => serde_json::to_string_pretty(&app.trends)?,
        Page::Geographic => serde_json::to_string_pretty(&app.geographic)?,
        Page::Engagement => serde_json::to_string_pretty(&app.engagement)?,
        Page::Search => serde_json::to_string_pretty(&app.search)?,
    };
    println!("{}", json);
    Ok(())
}

/// Map `--title/--genre/--years` onto the search form.
fn apply_search_flags(app: &mut App, cli: &Cli) -> Result<()> {
    if let Some(title) = &cli.title {
        app.form.input = title.clone();
    }

    if let Some(genre) = &cli.genre {
        match app.genres.iter().position(|g| g == genre) {
            // Index 0 is "All", so the list is offset by one
            Some(idx) => app.form.genre_idx = idx + 1,
            None => bail!("unknown genre '{}'", genre),
        }
    }

    if let Some(years) = &cli.years {
        let (from, to) = years
            .split_once(':')
            .context("--years expects FROM:TO, e.g. 1990:2020")?;
        app.form.year_from = from.trim().parse().context("invalid start year")?;
        app.form.year_to = to.trim().parse().context("invalid end year")?;
        if app.form.year_from > app.form.year_to {
            bail!("--years start must not exceed end");
        }
    }

    Ok(())
}
