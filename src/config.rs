use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{AppError, Result};

pub const DATA_DIR: &str = "data";
pub const API_PORT: u16 = 8501;
pub const PAGE_TITLE: &str = "Pitcher K Edge Dashboard";

/// Daily datasets are named `{DATASET_PREFIX}{YYYY-MM-DD}.csv`.
pub const DATASET_PREFIX: &str = "dashboard_merged_";

/// Date format used in file names, query params and page titles.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display text for an edge that failed numeric coercion.
pub const MISSING_MARKER: &str = "—";

/// Decimal places per displayed column.
pub mod precision {
    pub const LINE: u32 = 1;
    pub const INNINGS: u32 = 2;
    pub const PROJECTED_KS: u32 = 2;
    pub const EDGE: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    Wide,
    Centered,
}

impl PageLayout {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(PageLayout::Wide),
            "centered" => Ok(PageLayout::Centered),
            other => Err(AppError::Config(format!(
                "PAGE_LAYOUT must be 'wide' or 'centered', got '{other}'"
            ))),
        }
    }
}

/// Page-level presentation settings handed to the renderer.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
    pub layout: PageLayout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            layout: PageLayout::Wide,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the daily CSVs (DATA_DIR)
    pub data_dir: PathBuf,
    /// Fixed report date instead of today (REPORT_DATE, YYYY-MM-DD)
    pub report_date: Option<NaiveDate>,
    pub log_level: String,
    pub api_port: u16,
    pub page: PageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let report_date = match std::env::var("REPORT_DATE") {
            Ok(s) if !s.trim().is_empty() => Some(
                parse_date(&s)
                    .map_err(|_| AppError::Config(format!("REPORT_DATE must be YYYY-MM-DD, got '{s}'")))?,
            ),
            _ => None,
        };

        Ok(Self {
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| DATA_DIR.to_string())),
            report_date,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| API_PORT.to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            page: PageConfig {
                title: std::env::var("PAGE_TITLE").unwrap_or_else(|_| PAGE_TITLE.to_string()),
                layout: PageLayout::parse(
                    &std::env::var("PAGE_LAYOUT").unwrap_or_else(|_| "wide".to_string()),
                )?,
            },
        })
    }

    /// The date a report is built for when the request does not name one.
    pub fn default_date(&self) -> NaiveDate {
        self.report_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| AppError::InvalidDate(format!("'{s}' ({e})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = parse_date("2025-06-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(matches!(parse_date("06/01/2025"), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn layout_accepts_known_values_only() {
        assert_eq!(PageLayout::parse("Wide").unwrap(), PageLayout::Wide);
        assert_eq!(PageLayout::parse("centered").unwrap(), PageLayout::Centered);
        assert!(matches!(PageLayout::parse("tall"), Err(AppError::Config(_))));
    }

    #[test]
    fn fixed_report_date_wins_over_today() {
        let fixed = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        let cfg = Config {
            data_dir: PathBuf::from(DATA_DIR),
            report_date: Some(fixed),
            log_level: "info".to_string(),
            api_port: API_PORT,
            page: PageConfig::default(),
        };
        assert_eq!(cfg.default_date(), fixed);
    }
}
