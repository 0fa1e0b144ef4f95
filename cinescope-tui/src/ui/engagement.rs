//! User Engagement page: comment volume and most-discussed movies.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Cell, Row, Sparkline, Table},
    Frame,
};

use crate::app::App;
use crate::ui::{render_loading, render_no_data, render_tiles, ACCENT, BAR_COLOR};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = match &app.engagement {
        Some(view) => view,
        None => {
            render_loading(frame, area);
            return;
        }
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Metric tiles
        Constraint::Min(6),    // Activity sparkline
        Constraint::Length(12), // Most discussed
    ])
    .split(area);

    render_tiles(frame, &view.tiles, chunks[0]);
    render_trend(frame, app, chunks[1]);
    render_most_discussed(frame, app, chunks[2]);
}

fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.engagement else {
        return;
    };
    if view.trend.is_empty() {
        render_no_data(frame, " Comment Activity Over Time ", area);
        return;
    }

    let counts: Vec<u64> = view.trend.iter().map(|p| p.count.max(0) as u64).collect();
    let title = format!(
        " Comment Activity Over Time ({} - {}) ",
        view.trend.first().map(|p| p.label.as_str()).unwrap_or(""),
        view.trend.last().map(|p| p.label.as_str()).unwrap_or(""),
    );

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(BAR_COLOR))
        .data(&counts);
    frame.render_widget(sparkline, area);
}

fn render_most_discussed(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.engagement else {
        return;
    };
    if view.most_discussed.is_empty() {
        render_no_data(frame, " Most Discussed Movies ", area);
        return;
    }

    let header =
        Row::new(["#", "Title", "Year", "Comments"]).style(Style::default().fg(ACCENT).bold());

    let rows: Vec<Row> = view
        .most_discussed
        .iter()
        .map(|movie| {
            Row::new(vec![
                Cell::from(movie.rank.to_string()),
                Cell::from(movie.title.clone()),
                Cell::from(movie.year.clone()),
                Cell::from(movie.comments.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(24),
            Constraint::Length(5),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Most Discussed Movies "),
    );
    frame.render_widget(table, area);
}
