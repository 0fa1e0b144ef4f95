//! UI rendering for the TUI.

mod analytics;
mod engagement;
mod geographic;
mod overview;
mod search;
mod trends;

use cinescope_core::view::MetricTile;
use cinescope_core::Page;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Accent color for the active page tab and headers.
pub(crate) const ACCENT: Color = Color::Cyan;
/// Label color for metric tiles and metadata.
pub(crate) const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Bar color for count charts.
pub(crate) const BAR_COLOR: Color = Color::Rgb(70, 130, 180);
/// Color for rating-derived values.
pub(crate) const RATING_COLOR: Color = Color::Rgb(50, 205, 50);
/// Map marker color.
pub(crate) const MARKER_COLOR: Color = Color::Red;

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: tab header, page body, footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Page body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_tab_header(frame, app.page, chunks[0]);

    if let Some(error) = app.error.clone() {
        render_error(frame, &error, chunks[1]);
    } else {
        match app.page {
            Page::Overview => overview::render(frame, app, chunks[1]),
            Page::MovieAnalytics => analytics::render(frame, app, chunks[1]),
            Page::TemporalTrends => trends::render(frame, app, chunks[1]),
            Page::Geographic => geographic::render(frame, app, chunks[1]),
            Page::Engagement => engagement::render(frame, app, chunks[1]),
            Page::Search => search::render(frame, app, chunks[1]),
        }
    }

    render_footer(frame, app, chunks[2]);
}

/// Render the tab bar: app name on the left, one tab per page.
fn render_tab_header(frame: &mut Frame, active: Page, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Length(12), // App name
        Constraint::Min(1),     // Tabs
    ])
    .split(area);

    let app_name = Paragraph::new(" cinescope").style(Style::default().fg(ACCENT).bold());
    frame.render_widget(app_name, chunks[0]);

    let mut spans: Vec<Span> = Vec::new();
    for (i, page) in Page::all().into_iter().enumerate() {
        let style = if page == active {
            Style::default()
                .fg(ACCENT)
                .bold()
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {}:{} ", i + 1, page.title()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[1]);
}

/// Render a page-level load error. Other pages keep their data; this one
/// offers a retry.
fn render_error(frame: &mut Frame, error: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Failed to load this page",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::raw(""),
        Line::raw(error.to_string()),
        Line::raw(""),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Error "));
    frame.render_widget(paragraph, area);
}

/// Render the key-hint footer.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.page {
        Page::Search if app.form.editing => "type to search | Enter: run | Esc: done",
        Page::Search => {
            "q: quit | Tab/1-6: pages | /: edit title | g/G: genre | [ ] { }: years | Enter: search"
        }
        Page::MovieAnalytics => "q: quit | Tab/1-6: pages | Up/Down: select | r: reload",
        _ => "q: quit | Tab/1-6: pages | r: reload",
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

/// Render a row of metric tiles, one bordered block each.
pub(crate) fn render_tiles(frame: &mut Frame, tiles: &[MetricTile], area: Rect) {
    if tiles.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
    let chunks = Layout::horizontal(constraints).split(area);

    for (tile, chunk) in tiles.iter().zip(chunks.iter()) {
        let text = vec![
            Line::from(Span::styled(
                tile.value.clone(),
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(Span::styled(
                tile.label.clone(),
                Style::default().fg(LABEL_COLOR),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .centered();
        frame.render_widget(paragraph, *chunk);
    }
}

/// Placeholder for a page whose data has not loaded yet.
pub(crate) fn render_loading(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

/// Notice for an empty, but valid, result set.
pub(crate) fn render_no_data(frame: &mut Frame, title: &str, area: Rect) {
    let placeholder = Paragraph::new("No data")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(placeholder, area);
}
