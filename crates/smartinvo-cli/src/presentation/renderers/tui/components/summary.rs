use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use smartinvo_types::RecommendationResult;

use super::Component;
use crate::presentation::formatters::number::{
    format_days, format_percent, format_score, format_signed,
};
use crate::presentation::renderers::tui::app::AppState;

pub(crate) struct SummaryComponent;

impl Component for SummaryComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(6)]).split(area);
        render_recommendation(f, chunks[0], state);
        render_model(f, chunks[1], state);
    }
}

fn render_recommendation(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = &state.recommendation;
    let mut lines = Vec::new();

    if snapshot.submitting {
        lines.push(Line::styled("Submitting...", Style::default().fg(Color::Yellow)));
    }
    if let Some(error) = &snapshot.error {
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
    }
    match &snapshot.result {
        Some(result) => lines.extend(result_lines(result)),
        None if !snapshot.submitting => {
            let hint = if state.form_ready {
                "Press s to request a recommendation"
            } else {
                "No recommendation yet"
            };
            lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
        }
        None => {}
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Recommendation "));
    f.render_widget(widget, area);
}

/// Text first, then only the fields the service returned
fn result_lines(result: &RecommendationResult) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        result.recommendation_text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    let mut field = |label: &str, value: String| {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ]));
    };

    if let Some(loss) = result.loss_percentage {
        field("Loss", format_percent(loss));
    }
    if let Some(risk) = result.risk_score {
        field("Risk", format_score(risk));
    }
    if let Some(days) = result.days_in_stock {
        field("In stock", format_days(days));
    }
    if let Some(days) = result.avg_shelf_life {
        field("Avg shelf life", format_days(days));
    }
    if let Some(days) = result.adjusted_shelf_life {
        let value = match result.shelf_life_delta() {
            Some(delta) if delta != 0 => format!("{} ({})", format_days(days), format_signed(delta)),
            _ => format_days(days),
        };
        field("Adjusted", value);
    }
    if let Some(explanation) = &result.weather_explanation {
        field("Weather", explanation.clone());
    }
    lines
}

fn render_model(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = match &state.model {
        Some(info) => {
            let mut lines = vec![
                Line::from(info.model.clone()),
                Line::from(format!("R² {:.2}", info.accuracy)),
            ];
            if let Some(conclusion) = &info.conclusion {
                lines.push(Line::styled(conclusion.clone(), Style::default().fg(Color::Green)));
            }
            lines
        }
        None => vec![Line::styled(
            "Model info unavailable",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Model "));
    f.render_widget(widget, area);
}
