use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Gauge, Paragraph},
};
use smartinvo_runtime::RevealedStep;

use super::Component;
use crate::presentation::formatters::number::{format_compact, format_percent};
use crate::presentation::renderers::tui::app::AppState;

pub(crate) struct TraceComponent;

impl Component for TraceComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let trace = &state.trace;
        let status = if trace.is_running() { "running" } else { "idle" };
        let progress = match trace.total {
            Some(total) => format!("{}/{}", trace.steps.len(), total),
            None => "-".to_string(),
        };
        let block = Block::bordered().title(format!(" Transformation trace ({status}, {progress}) "));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if trace.steps.is_empty() {
            let hint = if trace.is_running() {
                "Fetching steps..."
            } else {
                "Press t to run the aggregation trace"
            };
            f.render_widget(
                Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let mut constraints: Vec<Constraint> = trace
            .steps
            .iter()
            .map(|step| Constraint::Length(step_height(step)))
            .collect();
        constraints.push(Constraint::Min(0));
        let chunks = Layout::vertical(constraints).split(inner);

        for (index, (step, chunk)) in trace.steps.iter().zip(chunks.iter()).enumerate() {
            render_step(f, *chunk, index + 1, step);
        }
    }
}

fn step_height(step: &RevealedStep) -> u16 {
    let gauge = u16::from(step.progress.is_some());
    let top = step.step.top.as_ref().map_or(0, Vec::len) as u16;
    2 + gauge + top
}

fn render_step(f: &mut Frame, area: Rect, position: usize, step: &RevealedStep) {
    let gauge_rows = u16::from(step.progress.is_some());
    let top_rows = step.step.top.as_ref().map_or(0, Vec::len) as u16;
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(gauge_rows),
        Constraint::Length(top_rows),
    ])
    .split(area);

    let text = vec![
        Line::styled(
            format!("{}. {}", position, step.step.step),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("   {}", step.description_text())),
    ];
    f.render_widget(Paragraph::new(text), chunks[0]);

    if let Some(frame) = step.progress_frame() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(frame.ratio().clamp(0.0, 1.0))
            .label(format!("{} / {} rows", format_compact(frame.current), format_compact(frame.total)));
        f.render_widget(gauge, chunks[1]);
    }

    if let Some(top) = &step.step.top {
        let lines: Vec<Line> = top
            .iter()
            .map(|entry| {
                Line::from(format!(
                    "   - {} {}",
                    entry.commodity,
                    format_percent(entry.loss_percentage)
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[2]);
    }
}
