//! Error types for the TVmaze show browser
//!
//! This module defines all error types used throughout the library.
//! TvMazeError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for TVmaze show browser operations
#[derive(Error, Debug)]
pub enum TvMazeError {
    /// HTTP request failed (connection, timeout or body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Failed to parse the API payload
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Invalid show ID provided
    #[error("Invalid show ID: {0}")]
    InvalidId(u32),

    /// Configuration value could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No show card is displayed at the given position
    #[error("No show card at position {0}")]
    CardNotFound(usize),

    /// The clicked card belongs to a show list that has since been replaced
    #[error("Show card from list {clicked} is stale, list {current} is displayed")]
    StaleCard { clicked: u64, current: u64 },

    /// A show card no longer carries its show ID
    #[error("Show card has no show ID")]
    MissingShowId,
}

impl TvMazeError {
    /// Whether this error means the round trip to the API failed.
    ///
    /// Covers connection errors, non-2xx responses and malformed payloads.
    /// The controller surfaces these as a non-fatal notice.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            TvMazeError::HttpError(_) | TvMazeError::Status { .. } | TvMazeError::ParseError(_)
        )
    }
}

impl From<serde_json::Error> for TvMazeError {
    fn from(err: serde_json::Error) -> Self {
        TvMazeError::ParseError(err.to_string())
    }
}

/// Serialize TvMazeError as a string for Tauri compatibility
impl Serialize for TvMazeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for TVmaze show browser operations
pub type Result<T> = std::result::Result<T, TvMazeError>;
