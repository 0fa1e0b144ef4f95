//! Movie Analytics page: top-rated table and genre performance.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::{render_loading, render_no_data, ACCENT, RATING_COLOR};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.analytics.is_none() {
        render_loading(frame, area);
        return;
    }

    let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_top_rated(frame, app, chunks[0]);

    let right = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_genre_bars(frame, app, right[0]);
    render_genre_scatter(frame, app, right[1]);
}

fn render_top_rated(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(view) = &app.analytics else {
        return;
    };
    if view.top_rated.is_empty() {
        render_no_data(frame, " Top Rated Movies ", area);
        return;
    }

    let header = Row::new(["#", "Title", "Year", "Rating", "Votes"])
        .style(Style::default().fg(ACCENT).bold());

    let rows: Vec<Row> = view
        .top_rated
        .iter()
        .map(|movie| {
            Row::new(vec![
                Cell::from(movie.rank.to_string()),
                Cell::from(format!("{}\n{}", movie.title, movie.genres)),
                Cell::from(movie.year.clone()),
                Cell::from(movie.rating.clone()).style(Style::default().fg(RATING_COLOR)),
                Cell::from(movie.votes.clone()),
            ])
            .height(2)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(24),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Top Rated Movies (min. 1000 votes) "),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_genre_bars(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.analytics else {
        return;
    };
    if view.genre_performance.is_empty() {
        render_no_data(frame, " Avg Rating by Genre ", area);
        return;
    }

    // Bars carry the rating x10 so half points survive integer scaling;
    // the printed value stays the real rating
    let bars: Vec<Bar> = view
        .genre_performance
        .iter()
        .map(|point| {
            Bar::default()
                .label(Line::from(point.genre.clone()))
                .value((point.avg_rating * 10.0).round() as u64)
                .text_value(format!("{:.1}", point.avg_rating))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Avg Rating by Genre "),
        )
        .direction(ratatui::layout::Direction::Horizontal)
        .bar_gap(0)
        .bar_style(Style::default().fg(RATING_COLOR))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_genre_scatter(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.analytics else {
        return;
    };
    if view.genre_performance.is_empty() {
        render_no_data(frame, " Rating vs Popularity ", area);
        return;
    }

    let points: Vec<(f64, f64)> = view
        .genre_performance
        .iter()
        .map(|p| (p.count as f64, p.avg_rating))
        .collect();

    let max_count = points.iter().map(|(x, _)| *x).fold(1.0_f64, f64::max);

    let dataset = Dataset::default()
        .name("genres")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(ACCENT))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rating vs Popularity "),
        )
        .x_axis(
            Axis::default()
                .title("Movies")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max_count * 1.05])
                .labels(vec!["0".to_string(), format!("{:.0}", max_count)]),
        )
        .y_axis(
            Axis::default()
                .title("Avg Rating")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, 10.0])
                .labels(vec!["0".to_string(), "5".to_string(), "10".to_string()]),
        );
    frame.render_widget(chart, area);
}
