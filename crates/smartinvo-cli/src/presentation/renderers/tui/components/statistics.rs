use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph},
};
use smartinvo_types::WasteStatEntry;

use super::Component;
use crate::presentation::formatters::number::format_percent;
use crate::presentation::renderers::tui::app::AppState;

const MAX_BARS: usize = 8;

pub(crate) struct StatisticsComponent;

impl Component for StatisticsComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let snapshot = &state.statistics;
        let store_title = format!(" Store statistics: {} ", snapshot.city);
        // Only the current city's list is ever shown
        let store = snapshot
            .store
            .as_ref()
            .filter(|store| store.city == snapshot.city)
            .map(|store| store.entries.as_slice());
        render_chart(f, chunks[0], &store_title, store, Color::Yellow);

        let global = snapshot.global_loaded.then_some(snapshot.global.as_slice());
        render_chart(f, chunks[1], " Global waste statistics ", global, Color::Cyan);
    }
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    entries: Option<&[WasteStatEntry]>,
    color: Color,
) {
    let block = Block::bordered().title(title.to_string());

    let Some(entries) = entries else {
        f.render_widget(Paragraph::new("Waiting for data...").block(block), area);
        return;
    };
    if entries.is_empty() {
        f.render_widget(Paragraph::new("No spoiled items recorded").block(block), area);
        return;
    }

    let mut ranked: Vec<&WasteStatEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.loss_percentage.total_cmp(&a.loss_percentage));

    let bars: Vec<Bar> = ranked
        .into_iter()
        .take(MAX_BARS)
        .map(|entry| {
            Bar::default()
                .value((entry.loss_percentage * 10.0).round().max(0.0) as u64)
                .label(Line::from(entry.commodity.clone()))
                .text_value(format_percent(entry.loss_percentage))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(color))
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}
