use crate::args::hints::{cmd, fmt};
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, RecommendationViewModel, ShelfLifeViewModel, StatusBadge,
};
use smartinvo_runtime::ShelfLifeReport;
use smartinvo_types::{RecommendationRequest, RecommendationResult};

pub fn present_recommendation(
    request: &RecommendationRequest,
    result: RecommendationResult,
) -> CommandResultViewModel<RecommendationViewModel> {
    let shelf_life_delta = result.shelf_life_delta();
    let content = RecommendationViewModel {
        item: request.item().to_string(),
        category: request.category(),
        city: request.city().to_string(),
        arrival_date: request.arrival_date(),
        result,
        shelf_life_delta,
    };

    CommandResultViewModel::new(content)
        .with_badge(StatusBadge::success("Recommendation ready"))
        .with_suggestion(
            Guidance::new(format!("Store statistics for {}", request.city()))
                .with_command(fmt::stats(request.city())),
        )
        .with_suggestion(
            Guidance::new("Replay the global waste aggregation").with_command(cmd::STEPS),
        )
}

pub fn present_shelf_life(report: ShelfLifeReport) -> CommandResultViewModel<ShelfLifeViewModel> {
    let content = ShelfLifeViewModel {
        item: report.result.item,
        avg_shelf_life: report.result.avg_shelf_life,
        commonly_wasted: report.commonly_wasted,
    };

    let badge = if content.commonly_wasted {
        StatusBadge::warning(format!("{} is commonly wasted", content.item))
    } else {
        StatusBadge::info(format!("Shelf life of {}", content.item))
    };

    CommandResultViewModel::new(content).with_badge(badge)
}
