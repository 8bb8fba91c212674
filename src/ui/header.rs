use crate::api::FilmSource;
use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SEARCH_LABEL: &str = " 🔍 ";

/// Sort selector on the left, search field on the right.
pub fn render<S: FilmSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(20)])
        .split(area);

    // ── Sort selector ──
    let sort = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}", app.sort_mode.label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Sort (o) "),
    );
    frame.render_widget(sort, chunks[0]);

    // ── Search field ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let text = if app.search_query.is_empty() && app.input_mode == InputMode::Normal {
        Line::from(vec![
            Span::raw(SEARCH_LABEL),
            Span::styled("Type to search...", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw(SEARCH_LABEL),
            Span::styled(app.search_query.as_str(), Style::default().fg(Color::White)),
        ])
    };
    let title = if app.input_mode == InputMode::Editing {
        " Search (Enter/Esc to finish) "
    } else {
        " Search (/) "
    };
    let search = Paragraph::new(text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(title),
    );
    frame.render_widget(search, chunks[1]);

    // Set cursor position when editing
    if app.input_mode == InputMode::Editing {
        use unicode_width::UnicodeWidthStr;
        let cursor_x = chunks[1].x
            + 1
            + SEARCH_LABEL.width() as u16
            + app.search_query.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
