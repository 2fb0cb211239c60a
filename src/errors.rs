//! Unified application error type.
//! Every module (backend, core, cli, utils) returns AppError so that the
//! top-level dispatcher can report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Spreadsheet backend
    // ---------------------------
    #[error("Offline")]
    Offline,

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet '{worksheet}' not found in '{spreadsheet}'")]
    WorksheetNotFound {
        spreadsheet: String,
        worksheet: String,
    },

    #[error("Backend error: {0}")]
    Backend(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid status code: {0}")]
    InvalidStatus(String),

    #[error("Invalid hours value '{value}' for {email}")]
    InvalidHours { email: String, value: String },

    #[error("Missing column '{0}' in responses")]
    MissingColumn(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    // ---------------------------
    // Submission errors
    // ---------------------------
    #[error("Submission error: {0}")]
    Submission(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
