//! Data types for the TVmaze show browser
//!
//! This module contains the normalized records the browser displays.
//! All types implement Serialize and Deserialize for JSON compatibility with Tauri.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image shown on a card when the API has no image for a show
pub const MISSING_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// Minimal displayable record for one television show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSummary {
    /// TVmaze show identifier
    pub id: u32,
    /// Show title
    pub name: String,
    /// Description, may contain HTML markup
    pub summary: Option<String>,
    /// Medium-size image URL, or `MISSING_IMAGE_URL`
    pub image: String,
}

/// Minimal displayable record for one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// TVmaze episode identifier
    pub id: u32,
    /// Episode title
    pub name: String,
    /// Season number
    pub season: u32,
    /// Episode number within the season, None for specials
    pub number: Option<u32>,
}

/// Formats the episode as its list line: `Pilot (season 1, number 1)`
impl fmt::Display for EpisodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(
                f,
                "{} (season {}, number {})",
                self.name, self.season, number
            ),
            None => write!(f, "{} (season {}, special)", self.name, self.season),
        }
    }
}
