mod detail;
mod header;
mod help;
mod list;
pub mod stars;

use crate::api::FilmSource;
use crate::app::{App, CatalogState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Top-level render dispatch.
pub fn render<S: FilmSource>(app: &App<S>, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(app, frame, chunks[0]);

    match &app.catalog {
        CatalogState::Loading => render_message(frame, chunks[1], "Loading...", Color::DarkGray),
        CatalogState::Error(_) => {
            render_message(frame, chunks[1], "Error fetching movies.", Color::Red)
        }
        CatalogState::Loaded(_) => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);
            list::render(app, frame, panes[0]);
            detail::render(app, frame, panes[1]);
        }
    }

    render_status(app, frame, chunks[2]);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let message = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(message, area);
}

fn key_hint(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_status<S: FilmSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        key_hint(" ↑↓"),
        Span::raw(" Navigate  "),
        key_hint("/"),
        Span::raw(" Search  "),
        key_hint("o"),
        Span::raw(" Sort  "),
        key_hint("Enter"),
        Span::raw(" Details  "),
        key_hint("?"),
        Span::raw(" Help  "),
        key_hint("q"),
        Span::raw(" Quit  "),
    ];
    if matches!(app.catalog, CatalogState::Error(_)) {
        spans.push(key_hint("r"));
        spans.push(Span::raw(" Retry  "));
    }
    spans.push(Span::styled(
        app.status_msg.as_str(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Truncate a string to `max_width` terminal columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::sample_film;
    use crate::app::tests::FakeSource;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn screen<S: FilmSource>(app: &App<S>) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn films() -> Vec<crate::api::Film> {
        vec![
            sample_film("A New Hope", 4, "1977-05-25"),
            sample_film("The Phantom Menace", 1, "1999-05-19"),
        ]
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("A New Hope", 20), "A New Hope");
        assert_eq!(truncate_str("The Empire Strikes Back", 10), "The Empir…");
    }

    #[tokio::test]
    async fn test_loading_screen_is_exclusive() {
        let app = App::new(Arc::new(FakeSource::with_films(films())), 5);
        let text = screen(&app);
        assert!(text.contains("Loading..."));
        assert!(!text.contains("EPISODE"));
        assert!(!text.contains("pending"));
    }

    #[tokio::test]
    async fn test_error_screen_is_exclusive() {
        let source = FakeSource {
            fail_catalog: true,
            ..FakeSource::with_films(films())
        };
        let mut app = App::new(Arc::new(source), 5);
        app.load_catalog();
        app.settle().await;

        let text = screen(&app);
        assert!(text.contains("Error fetching movies."));
        assert!(!text.contains("EPISODE"));
        assert!(text.contains("Server error (HTTP 500)"));
    }

    #[tokio::test]
    async fn test_loaded_screen_shows_rows_and_placeholder() {
        let mut app = App::new(Arc::new(FakeSource::with_films(films())), 5);
        app.load_catalog();
        app.settle().await;

        let text = screen(&app);
        assert!(text.contains("EPISODE 4"));
        assert!(text.contains("Episode I - The Phantom Menace"));
        assert!(text.contains("1977-05-25"));
        assert!(text.contains("Click on a movie to see its details"));
    }

    #[tokio::test]
    async fn test_help_overlay_lists_sort_order() {
        let mut app = App::new(Arc::new(FakeSource::with_films(films())), 5);
        app.show_help = true;
        let text = screen(&app);
        assert!(text.contains("Help - Keybindings"));
        assert!(text.contains("Sort by... → Year... → Episode..."));
    }

    #[tokio::test]
    async fn test_detail_pane_after_selection() {
        let mut app = App::new(Arc::new(FakeSource::with_films(films())), 5);
        app.load_catalog();
        app.settle().await;
        app.select_highlighted();
        app.settle().await;

        let text = screen(&app);
        assert!(text.contains("Director: George Lucas"));
        assert!(text.contains("Crawl for A New Hope"));
        assert!(text.contains("IMDb: 8.0"));
    }
}
