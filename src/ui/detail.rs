use crate::api::{FilmSource, Ratings};
use crate::app::App;
use crate::roman::to_roman;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

pub fn render<S: FilmSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let Some(film) = app.selected_film() else {
        let placeholder = Paragraph::new("Click on a movie to see its details")
            .style(Style::default().fg(Color::DarkGray))
            .block(pane_block(" Details "));
        frame.render_widget(placeholder, area);
        return;
    };

    // Layout: film text(min) + ratings(fixed)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(area);

    // ── Film detail ──
    let heading = Line::from(Span::styled(
        format!("Episode {} - {}", to_roman(film.episode_id), film.title),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![heading, Line::from("")];
    match (&app.detail, &app.detail_error) {
        (Some(detail), _) => {
            lines.extend(detail.opening_crawl.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Director: ", Style::default().fg(Color::DarkGray)),
                Span::styled(detail.director.as_str(), Style::default().fg(Color::White)),
            ]));
        }
        (None, Some(err)) => {
            lines.push(Line::from(Span::styled(
                format!("Details unavailable ({err}). Press Enter to retry."),
                Style::default().fg(Color::DarkGray),
            )));
        }
        (None, None) => {
            lines.push(Line::from(Span::styled(
                "Loading details...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(pane_block(" Details "));
    frame.render_widget(content, chunks[0]);

    // ── Ratings ── rendered independently of the detail fetch
    let ratings = app.ratings_for(film);
    let ratings_widget = Paragraph::new(ratings_lines(app, film, ratings))
        .wrap(Wrap { trim: true })
        .block(pane_block(" Ratings "));
    frame.render_widget(ratings_widget, chunks[1]);
}

fn ratings_lines<S: FilmSource>(
    app: &App<S>,
    film: &crate::api::Film,
    ratings: Option<&Ratings>,
) -> Vec<Line<'static>> {
    let Some(ratings) = ratings else {
        return vec![Line::from(Span::styled(
            "Fetching ratings...",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut first = app.star_rating_for(film).to_spans();
    first.push(Span::styled(
        format!("  IMDb: {}", ratings.score),
        Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(first)];
    for source in &ratings.sources {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", source.source), Style::default().fg(Color::DarkGray)),
            Span::raw(source.value.clone()),
        ]));
    }
    if let Some(poster) = &ratings.poster {
        lines.push(Line::from(vec![
            Span::styled("Poster: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                poster.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines
}
