use crate::args::hints::fmt;
use crate::presentation::view_models::{
    CommandResultViewModel, DeletionViewModel, Guidance, StatisticsViewModel, StatusBadge,
    WasteRowViewModel,
};
use smartinvo_runtime::StatisticsSnapshot;
use smartinvo_types::WasteStatEntry;

/// Rows in service order
pub fn waste_rows(entries: &[WasteStatEntry]) -> Vec<WasteRowViewModel> {
    entries
        .iter()
        .map(|entry| WasteRowViewModel {
            name: entry.commodity.clone(),
            country: entry.country.clone(),
            loss_percentage: entry.loss_percentage,
        })
        .collect()
}

/// Rows sorted by loss, largest first
fn ranked_rows(entries: &[WasteStatEntry]) -> Vec<WasteRowViewModel> {
    let mut rows = waste_rows(entries);
    rows.sort_by(|a, b| b.loss_percentage.total_cmp(&a.loss_percentage));
    rows
}

fn store_rows(snapshot: &StatisticsSnapshot) -> Option<Vec<WasteRowViewModel>> {
    snapshot
        .store
        .as_ref()
        .filter(|store| store.city == snapshot.city)
        .map(|store| ranked_rows(&store.entries))
}

pub fn present_statistics(
    snapshot: &StatisticsSnapshot,
    chart_rows: usize,
) -> CommandResultViewModel<StatisticsViewModel> {
    let content = StatisticsViewModel {
        city: snapshot.city.clone(),
        global: snapshot
            .global_loaded
            .then(|| ranked_rows(&snapshot.global)),
        store: store_rows(snapshot),
        chart_rows,
    };

    let mut view = CommandResultViewModel::new(content);
    if view.content.global.is_none() || view.content.store.is_none() {
        view = view
            .with_badge(StatusBadge::warning("Some statistics could not be loaded"))
            .with_suggestion(
                Guidance::new("Check that the service is reachable")
                    .with_command(crate::args::hints::cmd::HEALTH),
            );
    }

    if let Some(top) = view.content.store.as_ref().and_then(|rows| rows.first()) {
        let guide = Guidance::new(format!("Shelf life of {}", top.name))
            .with_command(fmt::shelf_life(&top.name));
        view = view.with_suggestion(guide);
    }
    view.with_suggestion(
        Guidance::new(format!("Forecast for {}", snapshot.city))
            .with_command(fmt::weather(&snapshot.city)),
    )
}

pub fn present_deletion(
    item: &str,
    snapshot: &StatisticsSnapshot,
) -> CommandResultViewModel<DeletionViewModel> {
    let content = DeletionViewModel {
        city: snapshot.city.clone(),
        item: item.to_string(),
        store: store_rows(snapshot),
    };
    let badge = StatusBadge::success(format!("Deleted {} from {}", item, snapshot.city));
    CommandResultViewModel::new(content).with_badge(badge)
}
