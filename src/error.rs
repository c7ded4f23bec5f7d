use std::path::PathBuf;

use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The day's dataset could not be opened or read. Halts the whole report.
    #[error("File not found: {}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
            AppError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Io(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.to_string()).into_response()
    }
}
