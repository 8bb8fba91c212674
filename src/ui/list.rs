use super::truncate_str;
use crate::api::FilmSource;
use crate::app::App;
use crate::roman::to_roman;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub fn render<S: FilmSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let visible = app.visible_films();
    let title_width = (area.width as usize).saturating_sub(4);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|film| {
            let is_selected = app.selected.as_deref() == Some(film.url.as_str());
            let mut first = vec![Span::styled(
                format!("EPISODE {}  ", film.episode_id),
                Style::default().fg(Color::DarkGray),
            )];
            first.extend(app.star_rating_for(film).to_spans());

            let title = format!("Episode {} - {}", to_roman(film.episode_id), film.title);
            let title_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };

            ListItem::new(vec![
                Line::from(first),
                Line::from(Span::styled(truncate_str(&title, title_width), title_style)),
                Line::from(Span::styled(
                    film.release_date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let count_info = format!(" {} of {} ", visible.len(), app.films().len());

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Films ")
                .title_bottom(Line::from(count_info).alignment(Alignment::Right)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !visible.is_empty() {
        list_state.select(Some(app.list_selected));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}
