mod api;
mod config;
mod error;
mod loader;
mod render;
mod report;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::health::HealthState;
use crate::api::routes::{router, ApiState};
use crate::config::{Config, DATE_FORMAT};
use crate::error::Result;
use crate::loader::dataset_path;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let today = cfg.default_date();
    let today_path = dataset_path(&cfg.data_dir, today);
    info!(
        "Serving edge reports from {} (report date: {}{})",
        cfg.data_dir.display(),
        today.format(DATE_FORMAT),
        if cfg.report_date.is_some() { ", fixed by REPORT_DATE" } else { "" },
    );
    if today_path.is_file() {
        info!("Today's dataset found at {}", today_path.display());
    } else {
        warn!(
            "No dataset at {} yet, the dashboard will show a blocking notice until it exists",
            today_path.display()
        );
    }

    let api_state = ApiState {
        cfg: Arc::new(cfg.clone()),
        health: Arc::new(HealthState::new()),
    };
    let app = router(api_state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Dashboard listening on http://{bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
