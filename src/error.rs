// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for rgaa-image-checker

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the checker library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Criteria catalog error: {0}")]
    Catalog(String),

    #[error("Input {} is {size} bytes, the limit is {limit} bytes", .path.display())]
    InputTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Unsupported file type: {} (expected .html or .htm)", .0.display())]
    UnsupportedFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
