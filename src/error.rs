use std::path::PathBuf;

use chrono::NaiveDate;
use lettre::address::AddressError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Rates endpoint answered with status {0}")]
    Status(StatusCode),

    #[error("Failed to parse JSON response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Can't compute query window ending on {0}")]
    DateOutOfRange(NaiveDate),
}

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Can't write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Can't resolve program directory: {0}")]
    ProgramDirectory(#[source] std::io::Error),

    #[error("Can't resolve output path: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid recipient address {0:?}: {1}")]
    Address(String, #[source] AddressError),

    #[error("Can't compose message: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("Invalid attachment type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("Can't read attachment {0:?}: {1}")]
    Attachment(PathBuf, #[source] std::io::Error),

    #[error("Mail client failed: {0}")]
    Transport(String),

    #[error("No recipients given")]
    NoRecipients,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Failures that stop a run before anything is mailed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}
