use serde::Deserialize;

/// Shown until the server has sent a report carrying its configured title.
pub const DEFAULT_TITLE: &str = "Pitcher K Edge Dashboard";

// ---------------------------------------------------------------------------
// API response types (mirror types.rs / routes.rs shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Missing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeCell {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowResponse {
    pub date: String,
    pub bookmaker: String,
    pub pitcher_name: String,
    pub line: String,
    pub over_odds: String,
    pub under_odds: String,
    pub expected_innings: String,
    pub projected_ks: String,
    pub edge_over: EdgeCell,
    pub edge_under: EdgeCell,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportResponse {
    pub title: String,
    pub date: String,
    pub positive: Vec<RowResponse>,
    pub negative: Vec<RowResponse>,
    pub coercion_skips: usize,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    /// Server is up but has no dataset for the day (HTTP 404).
    NoData(String),
    Error(String),
    Connecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Positive,
    Negative,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Positive => Pane::Negative,
            Pane::Negative => Pane::Positive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub report: ReportResponse,
    pub focus: Pane,
    pub last_refresh: std::time::Instant,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            report: ReportResponse::default(),
            focus: Pane::Positive,
            last_refresh: std::time::Instant::now(),
            base_url,
        }
    }

    pub fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Positive => self.report.positive.len(),
            Pane::Negative => self.report.negative.len(),
        }
    }

    pub async fn refresh(&mut self, client: &reqwest::Client) {
        let url = format!("{}/report", self.base_url);

        let resp = match client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("{e}"));
                return;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // A missing dataset blocks the whole report: drop the stale one.
            self.report = ReportResponse {
                title: std::mem::take(&mut self.report.title),
                ..ReportResponse::default()
            };
            self.status = if status == reqwest::StatusCode::NOT_FOUND {
                ConnectionStatus::NoData(body)
            } else {
                ConnectionStatus::Error(format!("{status}: {body}"))
            };
            return;
        }

        match resp.json::<ReportResponse>().await {
            Ok(report) => {
                self.report = report;
                self.status = ConnectionStatus::Connected;
                self.last_refresh = std::time::Instant::now();
            }
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("parse error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Header title: the server's page title and report date once a report arrived.
pub fn header_title(report: &ReportResponse) -> String {
    let title = if report.title.is_empty() {
        DEFAULT_TITLE
    } else {
        report.title.as_str()
    };
    let date = if report.date.is_empty() {
        "—"
    } else {
        report.date.as_str()
    };
    format!("{title} — {date}")
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[allow(dead_code)]
fn main() {
    // Shared by src/bin/tui.rs; not a standalone binary.
}
