use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::AppState;
use super::components::{Component, StatisticsComponent, SummaryComponent, TraceComponent};

const KEYS: &str = "t trace  r refresh  [ ] city  s submit  q quit";

pub(crate) fn draw(f: &mut Frame, state: &AppState) {
    let main_chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(50),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .split(f.area());

    render_title_bar(f, main_chunks[0], state);

    let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);
    StatisticsComponent.render(f, body[0], state);
    SummaryComponent.render(f, body[1], state);

    TraceComponent.render(f, main_chunks[2], state);
    render_footer(f, main_chunks[3], state);
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            "━━ ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "SmartInvo Dashboard",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" → {}", state.current_city()),
            Style::default().fg(Color::White),
        ),
    ];
    if state.cities.len() > 1 {
        spans.push(Span::styled(
            format!(" ({}/{})", state.city_index + 1, state.cities.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        " ━━",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let notice = match &state.notice {
        Some(notice) if notice.is_error => {
            Span::styled(notice.text.clone(), Style::default().fg(Color::Red))
        }
        Some(notice) => Span::styled(notice.text.clone(), Style::default().fg(Color::Green)),
        None => Span::raw(""),
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(KEYS, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        notice,
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}
