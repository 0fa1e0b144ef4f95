//! Overview page: metric tiles, top genres, rating histogram.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{BarChart, Block, Borders},
    Frame,
};

use crate::app::App;
use crate::ui::{render_loading, render_no_data, render_tiles, BAR_COLOR, RATING_COLOR};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = match &app.overview {
        Some(view) => view,
        None => {
            render_loading(frame, area);
            return;
        }
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Metric tiles
        Constraint::Min(8),    // Charts
    ])
    .split(area);

    render_tiles(frame, &view.tiles, chunks[0]);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_genre_bars(frame, app, columns[0]);
    render_rating_histogram(frame, app, columns[1]);
}

fn render_genre_bars(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.overview else {
        return;
    };
    if view.top_genres.is_empty() {
        render_no_data(frame, " Top Genres ", area);
        return;
    }

    let data: Vec<(&str, u64)> = view
        .top_genres
        .iter()
        .map(|bar| (bar.label.as_str(), bar.value))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Top Genres "))
        .direction(Direction::Horizontal)
        .bar_gap(0)
        .bar_style(Style::default().fg(BAR_COLOR))
        .data(&data);
    frame.render_widget(chart, area);
}

fn render_rating_histogram(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.overview else {
        return;
    };
    let total: u64 = view.rating_histogram.iter().map(|b| b.count).sum();
    if total == 0 {
        render_no_data(frame, " Rating Distribution ", area);
        return;
    }

    let data: Vec<(&str, u64)> = view
        .rating_histogram
        .iter()
        .map(|bin| (bin.label.as_str(), bin.count))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rating Distribution (IMDb) "),
        )
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(RATING_COLOR))
        .data(&data);
    frame.render_widget(chart, area);
}
