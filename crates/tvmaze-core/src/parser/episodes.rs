//! Episode list parser for the TVmaze API
//!
//! Parses the JSON array returned by `/shows/{id}/episodes`.

use serde::Deserialize;

use crate::error::Result;
use crate::types::EpisodeSummary;

#[derive(Debug, Deserialize)]
struct WireEpisode {
    id: u32,
    name: String,
    season: u32,
    /// Null for specials
    #[serde(default)]
    number: Option<u32>,
}

/// Parse episodes from the `/shows/{id}/episodes` JSON body.
///
/// Ordering is whatever the API returns; it is not re-sorted here.
///
/// # Arguments
/// * `json` - Raw JSON body of the episodes response
///
/// # Returns
/// * `Ok(Vec<EpisodeSummary>)` with one entry per episode
/// * `Err(TvMazeError::ParseError)` if the payload is malformed
pub fn parse_episodes(json: &str) -> Result<Vec<EpisodeSummary>> {
    let episodes: Vec<WireEpisode> = serde_json::from_str(json)?;

    Ok(episodes
        .into_iter()
        .map(|episode| EpisodeSummary {
            id: episode.id,
            name: episode.name,
            season: episode.season,
            number: episode.number,
        })
        .collect())
}
