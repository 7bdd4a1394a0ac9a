use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML Error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Error opening or reading sim file '{path}': {source}")]
    Workbook {
        path: PathBuf,
        source: calamine::XlsxError,
    },

    #[error("{context}: cell '{cell}' not readable in sheet '{sheet}'")]
    CellRead {
        sheet: String,
        cell: String,
        context: &'static str,
    },

    #[error("{context}: failed to parse '{value}' at {location} into a number")]
    ValueFormat {
        location: String,
        value: String,
        context: &'static str,
    },

    #[error("{context}: failed to parse '{value}'")]
    DateTimeParse {
        value: String,
        context: &'static str,
    },

    #[error("hour {hour} duplicate or out of order")]
    OutOfOrderHour { hour: usize },

    #[error("constant {sheet}!{cell} unavailable: {reason}")]
    MissingConfigConstant {
        sheet: String,
        cell: String,
        reason: String,
    },

    #[error("error on executing {extractor} for hour {hour}: {source}")]
    Extractor {
        hour: usize,
        extractor: &'static str,
        source: Box<LogError>,
    },

    #[error("error on parsing line {line_number} (hour {hour}): {source}: {text}")]
    Line {
        hour: usize,
        line_number: usize,
        text: String,
        source: Box<LogError>,
    },

    #[error("Invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LogError>;
