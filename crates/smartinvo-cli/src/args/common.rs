use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct ViewModeArgs {
    #[arg(
        long,
        help = "Minimal output (one line per row, for scripting)",
        group = "view_mode"
    )]
    pub quiet: bool,

    #[arg(long, help = "Verbose output (every row and field)", group = "view_mode")]
    pub verbose: bool,
}

impl ViewModeArgs {
    pub fn resolve(&self) -> crate::presentation::ViewMode {
        use crate::presentation::ViewMode;

        if self.quiet {
            ViewMode::Minimal
        } else if self.verbose {
            ViewMode::Verbose
        } else {
            ViewMode::default()
        }
    }
}

/// Fields of a recommendation request; all four are checked before sending
#[derive(Debug, Clone, Default, Args)]
pub struct RecommendationArgs {
    #[arg(long, help = "Inventory item name, e.g. Spinach")]
    pub item: Option<String>,

    #[arg(
        long,
        help = "vegetable, fruit, dairy, meat, frozen, grains, nuts or other"
    )]
    pub category: Option<String>,

    #[arg(long, help = "Arrival date (YYYY-MM-DD)")]
    pub arrival_date: Option<String>,
}

impl RecommendationArgs {
    /// Build the form for `city`; absent flags become blank fields
    pub fn to_form(&self, city: &str) -> smartinvo_types::RecommendationForm {
        smartinvo_types::RecommendationForm::new(
            self.item.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            city,
            self.arrival_date.clone().unwrap_or_default(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.category.is_none() && self.arrival_date.is_none()
    }
}

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    #[arg(
        long,
        help = "City to show store statistics for; repeat to cycle with [ and ]"
    )]
    pub city: Vec<String>,

    #[command(flatten)]
    pub form: RecommendationArgs,
}
