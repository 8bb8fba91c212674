use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::films::SortMode;

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {keys:<10}"), Style::default().fg(Color::Yellow)),
        Span::raw(action.into()),
    ])
}

/// Selector labels in the order `o` steps through them.
fn sort_cycle() -> String {
    SortMode::ALL
        .iter()
        .map(|mode| mode.label())
        .collect::<Vec<_>>()
        .join(" → ")
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("r", "Reload films after an error"),
        Line::from(""),
        section("  Film List"),
        binding("↑/k ↓/j", "Move highlight"),
        binding("PgUp/PgDn", "Move a page"),
        binding("g/G", "Jump to first/last film"),
        binding("Enter", "Show details for the highlighted film"),
        binding("/", "Search titles (clears the selection)"),
        binding("Esc", "Clear search"),
        binding("o", format!("Cycle: {}", sort_cycle())),
        Line::from(""),
        section("  Details"),
        binding("J/K", "Scroll opening crawl"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help - Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
