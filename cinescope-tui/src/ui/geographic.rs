//! Geographic page: theater map and state distribution.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        BarChart, Block, Borders,
    },
    Frame,
};

use crate::app::App;
use crate::ui::{render_loading, render_no_data, BAR_COLOR, MARKER_COLOR};

// Continental US viewport; markers outside it are clipped by the canvas.
const LON_BOUNDS: [f64; 2] = [-126.0, -66.0];
const LAT_BOUNDS: [f64; 2] = [24.0, 50.0];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = match &app.geographic {
        Some(view) => view,
        None => {
            render_loading(frame, area);
            return;
        }
    };

    let chunks = Layout::vertical([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    if view.points.is_empty() {
        render_no_data(frame, " Theater Locations ", chunks[0]);
    } else {
        render_map(frame, app, chunks[0]);
    }

    if view.states.is_empty() {
        render_no_data(frame, " Theaters by State ", chunks[1]);
    } else {
        let data: Vec<(&str, u64)> = view
            .states
            .iter()
            .map(|bar| (bar.label.as_str(), bar.value))
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Theaters by State "),
            )
            .bar_width(4)
            .bar_gap(1)
            .bar_style(Style::default().fg(BAR_COLOR))
            .data(&data);
        frame.render_widget(chart, chunks[1]);
    }
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.geographic else {
        return;
    };

    // Canvas x is longitude, y is latitude
    let coords: Vec<(f64, f64)> = view.points.iter().map(|p| (p.lon, p.lat)).collect();

    let title = format!(
        " Theater Locations ({} shown, {} skipped) ",
        view.points.len(),
        view.skipped
    );

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_bounds(LON_BOUNDS)
        .y_bounds(LAT_BOUNDS)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &coords,
                color: MARKER_COLOR,
            });
        });
    frame.render_widget(canvas, area);
}
