//! Temporal Trends page: production volume and ratings by decade.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::ui::{render_loading, render_no_data, BAR_COLOR, RATING_COLOR};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = match &app.trends {
        Some(view) => view,
        None => {
            render_loading(frame, area);
            return;
        }
    };

    let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Production by decade
    if view.production.is_empty() {
        render_no_data(frame, " Movie Production by Decade ", chunks[0]);
    } else {
        let data: Vec<(&str, u64)> = view
            .production
            .iter()
            .map(|bar| (bar.label.as_str(), bar.value))
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Movie Production by Decade "),
            )
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(BAR_COLOR))
            .data(&data);
        frame.render_widget(chart, chunks[0]);
    }

    render_rating_trend(frame, app, chunks[1]);
}

fn render_rating_trend(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.trends else {
        return;
    };
    if view.rating_trend.is_empty() {
        render_no_data(frame, " Rating Trends Over Time ", area);
        return;
    }

    let ratings: Vec<(f64, f64)> = view
        .rating_trend
        .iter()
        .map(|p| (p.decade as f64, p.avg_rating))
        .collect();

    let first = ratings.first().map(|(x, _)| *x).unwrap_or(1950.0);
    let last = ratings.last().map(|(x, _)| *x).unwrap_or(2020.0);

    let dataset = Dataset::default()
        .name("avg rating")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(RATING_COLOR))
        .data(&ratings);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rating Trends Over Time "),
        )
        .x_axis(
            Axis::default()
                .title("Decade")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([first, last.max(first + 10.0)])
                .labels(vec![format!("{:.0}", first), format!("{:.0}", last)]),
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
