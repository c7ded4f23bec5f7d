use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::health::HealthState;
use crate::config::{parse_date, Config, DATE_FORMAT};
use crate::error::{AppError, Result};
use crate::loader::{dataset_path, load_rows};
use crate::render::html::{render_error_page, render_report_page};
use crate::report::{build_report, format_report};
use crate::types::FormattedReport;

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Arc<Config>,
    pub health: Arc<HealthState>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(get_page))
        .route("/report", get(get_report))
        .route("/health", get(get_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ReportQuery {
    /// YYYY-MM-DD; defaults to the configured date or today.
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_dir: String,
    pub today: String,
    pub today_available: bool,
    pub reports_built: u64,
    pub reports_failed: u64,
    pub last_report_at_ns: u64,
}

// ---------------------------------------------------------------------------
// Report generation
// ---------------------------------------------------------------------------

/// Resolve the date, load that day's file and build the formatted report.
/// Any error halts the report; nothing partial is returned.
fn generate(state: &ApiState, requested: Option<&str>) -> Result<FormattedReport> {
    let date = match requested {
        Some(s) => parse_date(s)?,
        None => state.cfg.default_date(),
    };
    let date_str = date.format(DATE_FORMAT).to_string();

    let rows = load_rows(&dataset_path(&state.cfg.data_dir, date))?;
    let report = build_report(&rows);

    info!(
        event = "REPORT_BUILT",
        date = %date_str,
        rows = report.total_rows(),
        positive = report.positive.len(),
        negative = report.negative.len(),
        coercion_skips = report.coercion_skips,
        "Report {date_str}: {} rows | {} positive | {} negative | {} non-numeric edges",
        report.total_rows(),
        report.positive.len(),
        report.negative.len(),
        report.coercion_skips,
    );

    Ok(format_report(&state.cfg.page.title, &date_str, &report))
}

fn generate_tracked(state: &ApiState, requested: Option<&str>) -> Result<FormattedReport> {
    let result = generate(state, requested);
    match &result {
        Ok(_) => state.health.record_built(now_ns()),
        Err(_) => state.health.record_failed(),
    }
    result
}

/// Runs the file read and build on the blocking pool.
async fn generate_blocking(state: &ApiState, requested: Option<String>) -> Result<FormattedReport> {
    let state = state.clone();
    tokio::task::spawn_blocking(move || generate_tracked(&state, requested.as_deref())).await?
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_page(
    State(state): State<ApiState>,
    Query(params): Query<ReportQuery>,
) -> (StatusCode, Html<String>) {
    match generate_blocking(&state, params.date.clone()).await {
        Ok(report) => (StatusCode::OK, Html(render_report_page(&state.cfg.page, &report))),
        Err(e) => {
            let date = params
                .date
                .clone()
                .unwrap_or_else(|| state.cfg.default_date().format(DATE_FORMAT).to_string());
            (e.status(), Html(render_error_page(&state.cfg.page, &date, &e.to_string())))
        }
    }
}

async fn get_report(
    State(state): State<ApiState>,
    Query(params): Query<ReportQuery>,
) -> std::result::Result<Json<FormattedReport>, AppError> {
    generate_blocking(&state, params.date).await.map(Json)
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let today = state.cfg.default_date();
    let today_available = dataset_path(&state.cfg.data_dir, today).is_file();

    Json(HealthResponse {
        status: if today_available { "ok" } else { "degraded" },
        data_dir: state.cfg.data_dir.display().to_string(),
        today: today.format(DATE_FORMAT).to_string(),
        today_available,
        reports_built: state.health.reports_built(),
        reports_failed: state.health.reports_failed(),
        last_report_at_ns: state.health.last_report_at_ns(),
    })
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
