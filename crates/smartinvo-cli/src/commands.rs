use super::args::{Cli, Commands, ConfigCommand, StatsCommand, hints::cmd};
use super::handlers;
use super::logging::{self, LogTarget};
use crate::presentation::OutputFormat;
use anyhow::Result;
use smartinvo_runtime::{Config, Dashboard, resolve_config_path};
use smartinvo_types::ValidationError;
use std::sync::Arc;

pub fn run(cli: Cli) -> Result<()> {
    let target = match cli.command {
        Some(Commands::Dashboard(_)) => LogTarget::Discard,
        _ => LogTarget::Stderr,
    };
    logging::init(cli.log_level, target);

    let Some(command) = cli.command else {
        show_guidance(cli.config.as_deref())?;
        return Ok(());
    };

    let format = OutputFormat::from(cli.format);
    let config_flag = cli.config.as_deref();
    let url_flag = cli.api_url.as_deref();

    match command {
        Commands::Config { command } => {
            let path = resolve_config_path(config_flag)?;
            match command {
                ConfigCommand::Show => handlers::config::show(&path, url_flag, format),
                ConfigCommand::Init { force } => handlers::config::init(&path, force, format),
            }
        }

        Commands::Dashboard(args) => {
            let config = Config::load(config_flag)?.resolve(url_flag)?;
            let runtime = build_runtime()?;
            handlers::dashboard::handle(&runtime, config, args)
        }

        command => {
            let config = Config::load(config_flag)?.resolve(url_flag)?;
            let runtime = build_runtime()?;
            runtime.block_on(dispatch(command, config, format))
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

async fn dispatch(command: Commands, config: Arc<Config>, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Recommend { city, form } => {
            let city = city.or_else(|| config.default_city.clone()).unwrap_or_default();
            handlers::recommend::handle(&config, form.to_form(&city), format).await
        }

        Commands::ShelfLife { item } => {
            let dashboard = Dashboard::builder(config).build()?;
            handlers::shelf_life::handle(&dashboard, &item, format).await
        }

        Commands::Stats {
            city,
            top,
            view,
            command,
        } => match command {
            Some(StatsCommand::Delete { city, item }) => {
                let city = require_city(city, &config)?;
                let dashboard = Dashboard::builder(config).city(city).build()?;
                handlers::stats::delete(&dashboard, &item, format).await
            }
            None => {
                let city = require_city(city, &config)?;
                let dashboard = Dashboard::builder(config).city(city).build()?;
                handlers::stats::show(&dashboard, top, format, view.resolve()).await
            }
        },

        Commands::Steps { no_animate, view } => {
            let dashboard = Dashboard::builder(config).build()?;
            handlers::steps::handle(&dashboard, no_animate, format, view.resolve()).await
        }

        Commands::Model => {
            let dashboard = Dashboard::builder(config).build()?;
            handlers::model::handle(&dashboard, format).await
        }

        Commands::Weather { city, view } => {
            let city = require_city(city, &config)?;
            let dashboard = Dashboard::builder(config).build()?;
            handlers::weather::handle(&dashboard, &city, format, view.resolve()).await
        }

        Commands::Health => {
            let dashboard = Dashboard::builder(config).build()?;
            handlers::health::handle(&dashboard, format).await
        }

        // Handled synchronously in `run`
        Commands::Config { .. } | Commands::Dashboard(_) => Ok(()),
    }
}

/// `--city`, else the configured default city
fn require_city(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.default_city.clone())
        .map(|city| city.trim().to_string())
        .filter(|city| !city.is_empty())
        .ok_or_else(|| missing("city"))
}

pub(crate) fn missing(field: &'static str) -> anyhow::Error {
    smartinvo_runtime::Error::from(ValidationError::MissingField(field)).into()
}

fn show_guidance(config_flag: Option<&str>) -> Result<()> {
    let config_exists = resolve_config_path(config_flag)?.exists();

    println!("smartinvo - Spoilage-aware inventory recommendations\n");

    if !config_exists {
        println!("Get started:");
        println!("  {}\n", cmd::CONFIG_INIT);
        println!("Then point api_url at your SmartInvo service and check it:");
        println!("  {}\n", cmd::HEALTH);
    } else {
        println!("Quick commands:");
        println!("  smartinvo recommend --item Spinach --category vegetable --city Singapore --arrival-date 2024-03-01");
        println!("  smartinvo stats --city Singapore    # Waste statistics");
        println!("  {}                     # Replay the aggregation trace", cmd::STEPS);
        println!("  smartinvo dashboard                 # Live dashboard\n");
    }

    println!("For more commands:");
    println!("  smartinvo --help");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_flag_beats_config_default() {
        let config = Config {
            default_city: Some("Lagos".to_string()),
            ..Config::default()
        };
        assert_eq!(require_city(Some(" Lima ".to_string()), &config).unwrap(), "Lima");
        assert_eq!(require_city(None, &config).unwrap(), "Lagos");
    }

    #[test]
    fn test_missing_city_is_a_validation_error() {
        let err = require_city(Some("  ".to_string()), &Config::default()).unwrap_err();
        assert_eq!(crate::exit_code(&err), 2);
        assert_eq!(err.to_string(), "city is required");
    }
}
