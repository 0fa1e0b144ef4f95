//! Search page: filter controls and result list.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, SearchFocus};
use crate::ui::{ACCENT, LABEL_COLOR, RATING_COLOR};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Filter controls
        Constraint::Min(5),    // Results
    ])
    .split(area);

    render_filters(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .split(area);

    let focus_style = Style::default().fg(ACCENT);
    let blur_style = Style::default().fg(Color::DarkGray);

    // Title input; a block cursor marks editing mode
    let title_text = if app.form.editing {
        Line::from(vec![
            Span::raw(app.form.input.clone()),
            Span::styled("█", Style::default().fg(ACCENT)),
        ])
    } else if app.form.input.is_empty() {
        Line::from(Span::styled("press / to type", blur_style))
    } else {
        Line::raw(app.form.input.clone())
    };
    let title_block_style = if app.form.focus == SearchFocus::Title {
        focus_style
    } else {
        blur_style
    };
    let title_input = Paragraph::new(title_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(title_block_style)
            .title(" Title "),
    );
    frame.render_widget(title_input, columns[0]);

    // Genre selector
    let genre_style = if app.form.focus == SearchFocus::Genre {
        focus_style
    } else {
        blur_style
    };
    let genre = Paragraph::new(app.form.genre_label(&app.genres).to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(genre_style)
            .title(" Genre (g) "),
    );
    frame.render_widget(genre, columns[1]);

    // Year range
    let years_style = if app.form.focus == SearchFocus::Years {
        focus_style
    } else {
        blur_style
    };
    let years = Paragraph::new(format!("{} - {}", app.form.year_from, app.form.year_to)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(years_style)
            .title(" Years ([ ] { }) "),
    );
    frame.render_widget(years, columns[2]);
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = match &app.search {
        Some(view) => view,
        None => {
            let hint = Paragraph::new("Set filters and press Enter to search")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Results "));
            frame.render_widget(hint, area);
            return;
        }
    };

    let title = format!(" Found {} movies ", view.found);

    if view.rows.is_empty() {
        let empty = Paragraph::new("No movies match these filters")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Title", "Year", "Genres", "Rating", "Plot"])
        .style(Style::default().fg(ACCENT).bold());

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|hit| {
            let rating = hit.rating.clone().unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(hit.title.clone()),
                Cell::from(hit.year.clone()),
                Cell::from(hit.genres.clone()).style(Style::default().fg(LABEL_COLOR)),
                Cell::from(rating).style(Style::default().fg(RATING_COLOR)),
                Cell::from(hit.plot.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(5),
            Constraint::Length(20),
            Constraint::Length(7),
            Constraint::Percentage(40),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
