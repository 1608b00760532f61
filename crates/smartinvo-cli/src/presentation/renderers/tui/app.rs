use smartinvo_runtime::{RecommendationSnapshot, SequencerSnapshot, StatisticsSnapshot};
use smartinvo_types::ModelInfo;

use super::DashboardFeed;

pub(crate) struct Notice {
    pub text: String,
    pub is_error: bool,
}

pub(crate) struct AppState {
    pub cities: Vec<String>,
    pub city_index: usize,
    /// A recommendation form was given on the command line
    pub form_ready: bool,
    pub notice: Option<Notice>,
    pub should_quit: bool,

    pub statistics: StatisticsSnapshot,
    pub model: Option<ModelInfo>,
    pub recommendation: RecommendationSnapshot,
    pub trace: SequencerSnapshot,
}

impl AppState {
    pub fn new(cities: Vec<String>, form_ready: bool) -> Self {
        let city = cities.first().cloned().unwrap_or_default();
        Self {
            cities,
            city_index: 0,
            form_ready,
            notice: None,
            should_quit: false,
            statistics: StatisticsSnapshot::for_city(city),
            model: None,
            recommendation: RecommendationSnapshot::default(),
            trace: SequencerSnapshot::default(),
        }
    }

    /// Copy the latest coordinator state for this frame
    pub fn refresh(&mut self, feed: &DashboardFeed) {
        self.statistics = feed.statistics.borrow().clone();
        self.model = feed.model.borrow().clone();
        self.recommendation = feed.recommendation.borrow().clone();
        self.trace = feed.trace.borrow().clone();
    }

    pub fn current_city(&self) -> &str {
        self.cities
            .get(self.city_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Move the selection by `delta`, wrapping; `None` with fewer than two cities
    pub fn cycle_city(&mut self, delta: isize) -> Option<String> {
        let count = self.cities.len();
        if count < 2 {
            return None;
        }
        let next = (self.city_index as isize + delta).rem_euclid(count as isize) as usize;
        self.city_index = next;
        Some(self.cities[next].clone())
    }

    pub fn set_notice(&mut self, text: String, is_error: bool) {
        self.notice = Some(Notice { text, is_error });
    }
}
