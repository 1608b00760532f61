use super::common::{DashboardArgs, RecommendationArgs, ViewModeArgs};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Request a spoilage and restocking recommendation")]
    Recommend {
        #[arg(long)]
        city: Option<String>,

        #[command(flatten)]
        form: RecommendationArgs,
    },

    #[command(about = "Look up the average shelf life of an item")]
    ShelfLife {
        /// Item name, matched case-insensitively against global waste data
        item: String,
    },

    #[command(about = "Show global and per-store waste statistics")]
    Stats {
        #[arg(long)]
        city: Option<String>,

        #[arg(long, default_value = "5", help = "Rows per chart")]
        top: usize,

        #[command(flatten)]
        view: ViewModeArgs,

        #[command(subcommand)]
        command: Option<StatsCommand>,
    },

    #[command(about = "Replay the global waste aggregation trace step by step")]
    Steps {
        #[arg(long, help = "Skip the animation and print the final trace")]
        no_animate: bool,

        #[command(flatten)]
        view: ViewModeArgs,
    },

    #[command(about = "Show metadata about the deployed prediction model")]
    Model,

    #[command(about = "Show the weather forecast the service uses for a city")]
    Weather {
        #[arg(long)]
        city: Option<String>,

        #[command(flatten)]
        view: ViewModeArgs,
    },

    #[command(about = "Check that the service is reachable")]
    Health,

    #[command(about = "Open the interactive dashboard")]
    Dashboard(DashboardArgs),

    #[command(about = "Inspect or create the config file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum StatsCommand {
    #[command(about = "Delete one item's statistic for a city and show the refreshed list")]
    Delete {
        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        item: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration")]
    Show,

    #[command(about = "Write a config file with default values")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
