use crate::args::{DashboardArgs, RecommendationArgs};
use crate::commands::missing;
use crate::presentation::renderers::{Action, DashboardFeed, TuiEvent, TuiRenderer};
use anyhow::{Result, bail};
use is_terminal::IsTerminal;
use smartinvo_runtime::{Config, Dashboard};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use tokio::runtime::Runtime;
use tracing::warn;

pub fn handle(runtime: &Runtime, config: Arc<Config>, args: DashboardArgs) -> Result<()> {
    if !io::stdout().is_terminal() {
        bail!("the dashboard needs an interactive terminal; use `smartinvo stats` or `smartinvo steps` instead");
    }

    let cities = dashboard_cities(&args.city, config.default_city.as_deref());
    let Some(first) = cities.first().cloned() else {
        return Err(missing("city"));
    };

    // Coordinators spawn onto the ambient runtime
    let _guard = runtime.enter();
    let dashboard = Arc::new(Dashboard::builder(config).city(first).build()?);

    runtime.spawn({
        let dashboard = dashboard.clone();
        async move { dashboard.mount().await }
    });

    let (tx, rx) = mpsc::channel();
    let renderer = TuiRenderer::new(
        DashboardFeed::subscribe(&dashboard),
        cities,
        !args.form.is_empty(),
    );

    renderer.run(rx, |action| {
        dispatch(runtime, &dashboard, &args.form, &tx, action);
    })
}

/// `--city` values in order without blanks or repeats; the config default otherwise
fn dashboard_cities(flags: &[String], default_city: Option<&str>) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for city in flags.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        if !cities.iter().any(|known| known == city) {
            cities.push(city.to_string());
        }
    }
    if cities.is_empty()
        && let Some(city) = default_city.map(str::trim).filter(|c| !c.is_empty())
    {
        cities.push(city.to_string());
    }
    cities
}

fn dispatch(
    runtime: &Runtime,
    dashboard: &Arc<Dashboard>,
    form: &RecommendationArgs,
    tx: &Sender<TuiEvent>,
    action: Action,
) {
    match action {
        Action::TriggerTrace => {
            if !dashboard.sequencer().pulse() {
                let _ = tx.send(TuiEvent::Notice("trace already running".to_string()));
            }
        }

        Action::RefreshStore => {
            let dashboard = dashboard.clone();
            runtime.spawn(async move {
                dashboard.statistics().refresh_store().await;
            });
        }

        Action::SelectCity(city) => {
            let dashboard = dashboard.clone();
            runtime.spawn(async move {
                dashboard.set_city(&city).await;
            });
        }

        Action::Submit { city } => {
            let dashboard = dashboard.clone();
            let form = form.to_form(&city);
            let tx = tx.clone();
            runtime.spawn(async move {
                let event = match dashboard.submit(&form).await {
                    Ok(_) => TuiEvent::Notice(format!("Recommendation ready for {}", form.item.trim())),
                    Err(e) => {
                        if !e.is_user_visible() {
                            warn!(error = %e, "recommendation submit failed");
                        }
                        TuiEvent::Error(e.to_string())
                    }
                };
                let _ = tx.send(event);
            });
        }
    }
}
