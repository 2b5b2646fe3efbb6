use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{state::DashboardState, theme};

pub fn render(f: &mut Frame, state: &DashboardState) {
    // title | input | result | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_title(f, chunks[0]);
    render_input(f, state, chunks[1]);
    render_result(f, state, chunks[2]);
    render_status(f, state, chunks[3]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Weather Dashboard 🌍",
        Style::default()
            .fg(theme::PANEL_BORDER_ACTIVE)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme::PANEL_BORDER)),
    );

    f.render_widget(title, area);
}

fn render_input(f: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default()
        .title(" City (Enter: Get Weather, Esc: quit) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::PANEL_BORDER_ACTIVE));

    let input = Paragraph::new(state.input.as_str())
        .style(Style::default().fg(theme::TEXT))
        .block(block);
    f.render_widget(input, area);

    let typed = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x + area.width.saturating_sub(2);
    f.set_cursor((area.x + 1).saturating_add(typed).min(max_x), area.y + 1);
}

fn render_result(f: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default()
        .title(" Report ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::PANEL_BORDER));

    let body = if state.result.is_empty() {
        Paragraph::new(Span::styled(
            "Type a city name and press Enter.",
            Style::default().fg(theme::SUBTEXT0),
        ))
    } else {
        Paragraph::new(state.result.as_str()).style(Style::default().fg(theme::TEXT))
    };

    f.render_widget(
        body.block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0)),
        area,
    );
}

fn render_status(f: &mut Frame, state: &DashboardState, area: Rect) {
    let status = Paragraph::new(format!(" {}", state.status.text())).style(
        Style::default()
            .fg(state.status.color())
            .bg(theme::SURFACE0),
    );

    f.render_widget(status, area);
}
