use ratatui::{Frame, layout::Rect};

use super::app::AppState;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, state: &AppState);
}

pub(crate) mod statistics;
pub(crate) mod summary;
pub(crate) mod trace;

pub(crate) use statistics::StatisticsComponent;
pub(crate) use summary::SummaryComponent;
pub(crate) use trace::TraceComponent;
