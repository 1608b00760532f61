// NOTE: Command Organization Rationale
//
// Why mostly flat commands?
// - Each command maps onto one service operation (recommend, shelf-life, weather...)
// - Only statistics and config own more than one action, so only they are namespaced
// - Example: `stats delete` vs `stats`, `config init` vs `config show`

mod commands;
mod common;
mod enums;
pub mod hints;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "smartinvo")]
#[command(about = "Spoilage-aware inventory recommendations and waste statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the SmartInvo service (overrides SMARTINVO_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["smartinvo", "model", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Model)));
    }

    #[test]
    fn test_stats_delete_parses() {
        let cli = Cli::try_parse_from([
            "smartinvo", "stats", "delete", "--city", "Lagos", "--item", "Yam",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Stats {
                command: Some(StatsCommand::Delete { city, item }),
                ..
            }) => {
                assert_eq!(city.as_deref(), Some("Lagos"));
                assert_eq!(item, "Yam");
            }
            _ => panic!("expected stats delete"),
        }
    }

    #[test]
    fn test_dashboard_accepts_repeated_cities() {
        let cli = Cli::try_parse_from([
            "smartinvo",
            "dashboard",
            "--city",
            "Singapore",
            "--city",
            "Lagos",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Dashboard(args)) => {
                assert_eq!(args.city, vec!["Singapore", "Lagos"]);
            }
            _ => panic!("expected dashboard"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["smartinvo", "--format", "yaml", "health"]).is_err());
    }
}
