// Core structs: DrawRow, DrawResult, DrawListing and the error kinds
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// The trimmed cell texts of one data row, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRow {
    pub draw: String,
    pub main: [String; 5],
    pub bonus: String,
    pub set: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    pub draw: u32,
    pub main: [u8; 5],
    pub bonus: u8,
    pub set: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawListing {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub draws: Vec<DrawResult>,
    /// Page text of each entry in `draws`, same order, for display.
    #[serde(skip)]
    pub rows: Vec<DrawRow>,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("could not build HTTP client: {0}")]
    Client(String),
    #[error("request failed: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector: {0}")]
    Selector(String),
    #[error("malformed {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid column layout: {0}")]
    Layout(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything that can end a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ScraperError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParserError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("output failed: {0}")]
    Output(#[from] serde_json::Error),
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParserError> {
    value.parse::<T>().map_err(|_| ParserError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl TryFrom<&DrawRow> for DrawResult {
    type Error = ParserError;

    fn try_from(row: &DrawRow) -> Result<Self, Self::Error> {
        let draw = parse_field("draw number", &row.draw)?;
        let mut main = [0u8; 5];
        for (slot, text) in main.iter_mut().zip(row.main.iter()) {
            *slot = parse_field("main number", text)?;
        }
        let bonus = parse_field("bonus number", &row.bonus)?;

        Ok(DrawResult {
            draw,
            main,
            bonus,
            set: row.set.clone(),
        })
    }
}
