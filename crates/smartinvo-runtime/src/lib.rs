pub mod animation;
pub mod config;
pub mod coordinators;
pub mod dashboard;
pub mod error;
pub mod sequencer;
pub mod stamp;
pub mod task;

pub use animation::{
    Animate, ProgressFrame, ProgressSimulator, Reveal, RevealState, Typewriter, TypewriterFrame,
};
pub use config::{AnimationConfig, Config, resolve_config_path};
pub use coordinators::{
    FetchOutcome, ModelInfoCoordinator, RecommendationCoordinator, RecommendationSnapshot,
    RefreshTarget, ShelfLifeLookup, ShelfLifeReport, StatisticsCoordinator, StatisticsSnapshot,
    StoreStatistics, WeatherLookup,
};
pub use dashboard::{Dashboard, DashboardBuilder};
pub use error::{Error, Result};
pub use sequencer::{RevealedStep, SequencerPhase, SequencerSnapshot, StepSequencer};
pub use stamp::{KeyedStamp, RequestTag};
pub use task::{ScopeRef, TaskHandle, TaskScope};
