//! JSON payload parsers for TVmaze API responses
//!
//! This module contains parsers that map API payloads onto the browser's records:
//! - `search`: Parse `/search/shows` results into show summaries
//! - `episodes`: Parse `/shows/{id}/episodes` into episode summaries

pub mod episodes;
pub mod search;

// Re-export main parsing functions
pub use episodes::parse_episodes;
pub use search::{image_or_fallback, parse_search_results};
