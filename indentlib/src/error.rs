//! Error types for indentlib

use std::path::PathBuf;
use thiserror::Error;

use crate::data::orders::RowOrigin;

/// Errors that can occur while loading orders or computing indents
#[derive(Error, Debug)]
pub enum IndentError {
    /// A required column is missing from the order table
    #[error("missing required column '{column}'")]
    Schema { column: String },

    /// A numeric column holds a value that is not a finite number
    #[error(
        "row {row}{}: column '{column}' is not numeric: {}",
        origin_suffix(.origin),
        describe_value(.value)
    )]
    Type {
        row: usize,
        origin: Option<RowOrigin>,
        column: String,
        value: Option<String>,
    },

    /// Parameter value outside the accepted range
    #[error("parameter '{name}' must be within [0, 20], got {value}")]
    InvalidParameter { name: String, value: f64 },

    /// Parameter name not recognized
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter file is not a JSON object of numbers
    #[error("invalid parameter file: {0}")]
    ParamsFormat(String),

    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed delimited text
    #[error("failed to parse '{source_name}': {message}")]
    Csv {
        source_name: String,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "<missing>".to_string(),
    }
}

fn origin_suffix(origin: &Option<RowOrigin>) -> String {
    match origin {
        Some(o) => format!(" ({}:{})", o.source, o.line),
        None => String::new(),
    }
}
